//! The matching primitive the engine drives.
//!
//! The engine never parses or executes regular expressions itself. It talks
//! to a [`RegexPrimitive`] that compiles a pattern under a flag string and a
//! [`CompiledMatcher`] that finds the next match from a byte offset. The
//! default backend is the `regex` crate ([`NativeRegex`]); tests substitute
//! scripted fakes to exercise the engine's loop and failure handling.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use super::cache::{RegexCache, cache_key};
use crate::config::EngineConfig;
use crate::error::{LabError, Result};
use crate::flags::FlagSet;

/// A match as reported by the primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// The matched text.
    pub text: String,
    /// Byte offset of the match start.
    pub index: usize,
    /// Capture groups in declaration order; `None` for groups that did not participate.
    pub groups: Vec<Option<String>>,
}

/// Compiles patterns into matchers.
pub trait RegexPrimitive: Send + Sync {
    /// Compile `pattern` under the flag string `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::PatternCompile`] if the primitive rejects the pattern.
    fn compile(&self, pattern: &str, flags: &str) -> Result<Arc<dyn CompiledMatcher>>;
}

/// A compiled pattern.
pub trait CompiledMatcher: Send + Sync {
    /// Find the next match in `text` starting at byte offset `from`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::MatchExecution`] if the search itself fails.
    fn exec_from(&self, text: &str, from: usize) -> Result<Option<RawMatch>>;
}

/// The `regex` crate as a matching primitive.
///
/// Flag handling: `i`, `m` and `s` map to the builder options of the same
/// meaning. `u` is accepted but Unicode mode stays on, since `&str`
/// haystacks require UTF-8 aware matching. `y` anchors each search at its
/// starting offset. `g` only affects how the engine iterates.
#[derive(Debug)]
pub struct NativeRegex {
    cache: RegexCache,
    size_limit: usize,
    dfa_size_limit: usize,
}

impl NativeRegex {
    /// Create a backend configured from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cache: RegexCache::new(config.cache_size),
            size_limit: config.size_limit,
            dfa_size_limit: config.dfa_size_limit,
        }
    }

    /// The compiled-regex cache.
    #[must_use]
    pub const fn cache(&self) -> &RegexCache {
        &self.cache
    }

    fn build(&self, pattern: &str, flags: FlagSet) -> std::result::Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dot_all)
            .unicode(true)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .build()
    }
}

impl Default for NativeRegex {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl RegexPrimitive for NativeRegex {
    fn compile(&self, pattern: &str, flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        let flags = FlagSet::decode(flags);
        let compile_flags = FlagSet {
            ignore_case: flags.ignore_case,
            multiline: flags.multiline,
            dot_all: flags.dot_all,
            ..FlagSet::new()
        };

        let regex = self
            .cache
            .get_or_compile(&cache_key(pattern, &compile_flags.encode()), || {
                self.build(pattern, flags)
            })
            .map_err(|e| LabError::pattern_compile(pattern, e.to_string()))?;

        Ok(Arc::new(NativeMatcher {
            regex,
            sticky: flags.sticky,
        }))
    }
}

/// A compiled `regex` crate pattern.
#[derive(Debug)]
struct NativeMatcher {
    regex: Arc<Regex>,
    sticky: bool,
}

impl CompiledMatcher for NativeMatcher {
    fn exec_from(&self, text: &str, from: usize) -> Result<Option<RawMatch>> {
        if from > text.len() {
            return Ok(None);
        }
        if !text.is_char_boundary(from) {
            return Err(LabError::match_execution(format!(
                "search offset {from} is not on a character boundary"
            )));
        }

        let Some(caps) = self.regex.captures_at(text, from) else {
            return Ok(None);
        };
        // A leftmost search finds a match at `from` whenever one exists there.
        let Some(whole) = caps.get(0) else {
            return Ok(None);
        };
        if self.sticky && whole.start() != from {
            return Ok(None);
        }

        let groups = caps
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();

        Ok(Some(RawMatch {
            text: whole.as_str().to_string(),
            index: whole.start(),
            groups,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str, flags: &str) -> Arc<dyn CompiledMatcher> {
        NativeRegex::default().compile(pattern, flags).unwrap()
    }

    #[test]
    fn finds_match_from_offset() {
        let m = compile(r"\d+", "").exec_from("a12b34", 3).unwrap().unwrap();
        assert_eq!(m.text, "34");
        assert_eq!(m.index, 4);
    }

    #[test]
    fn ignore_case_flag_applies() {
        let m = compile("abc", "i").exec_from("xABC", 0).unwrap().unwrap();
        assert_eq!(m.index, 1);
        assert!(compile("abc", "").exec_from("xABC", 0).unwrap().is_none());
    }

    #[test]
    fn multiline_and_dot_all_flags_apply() {
        assert!(compile("^b", "m").exec_from("a\nb", 0).unwrap().is_some());
        assert!(compile("^b", "").exec_from("a\nb", 0).unwrap().is_none());
        assert!(compile("a.b", "s").exec_from("a\nb", 0).unwrap().is_some());
        assert!(compile("a.b", "").exec_from("a\nb", 0).unwrap().is_none());
    }

    #[test]
    fn sticky_requires_match_at_offset() {
        let matcher = compile("b", "y");
        assert!(matcher.exec_from("ab", 0).unwrap().is_none());
        assert_eq!(matcher.exec_from("ab", 1).unwrap().unwrap().index, 1);
    }

    #[test]
    fn non_participating_groups_are_none() {
        let m = compile("(a)|(b)", "").exec_from("b", 0).unwrap().unwrap();
        assert_eq!(m.groups, vec![None, Some("b".to_string())]);
    }

    #[test]
    fn offset_past_end_finds_nothing() {
        assert!(compile("", "").exec_from("ab", 3).unwrap().is_none());
    }

    #[test]
    fn offset_inside_char_is_an_execution_error() {
        let err = compile("x", "").exec_from("é", 1).unwrap_err();
        assert!(matches!(err, LabError::MatchExecution { .. }));
    }

    #[test]
    fn invalid_pattern_is_compile_error() {
        let err = NativeRegex::default().compile("(", "").err().unwrap();
        assert!(err.is_compile_error());
    }

    #[test]
    fn compile_flags_share_cache_entries() {
        let native = NativeRegex::default();
        native.compile("a", "g").unwrap();
        native.compile("a", "gy").unwrap();
        native.compile("a", "i").unwrap();
        assert_eq!(native.cache().len(), 2);
    }
}
