//! Match execution.
//!
//! [`MatchEngine`] turns a pattern, a flag set and sample text into a
//! [`MatchRun`]. Global runs iterate from the end of each match; a
//! zero-length match advances the search by one character past its start
//! so iteration always makes progress. Execution failures never escape: they
//! produce an invalid run with no matches.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use super::primitive::{CompiledMatcher, NativeRegex, RawMatch, RegexPrimitive};
use crate::config::EngineConfig;
use crate::error::{LabError, Result};
use crate::flags::FlagSet;

/// One match within the sample text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// The matched text, equal to `sample[start_index..end_index]`.
    pub text: String,
    /// Byte offset where the match starts.
    pub start_index: usize,
    /// Byte offset one past the end of the match.
    pub end_index: usize,
    /// Capture groups in declaration order; `None` marks a group that did not participate.
    pub groups: Vec<Option<String>>,
}

impl Match {
    /// Length of the match in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Check if the match is zero-length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Group text for display, with non-participating groups rendered empty.
    pub fn group_texts(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.as_deref().unwrap_or(""))
    }
}

/// The output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRun {
    /// Matches in order of discovery.
    pub matches: Vec<Match>,
    /// Time spent executing matches.
    #[serde(rename = "elapsedTimeMs", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// False when execution failed.
    pub valid: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: serde::Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

impl MatchRun {
    /// An empty, valid run that took no time.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            matches: Vec::new(),
            elapsed: Duration::ZERO,
            valid: true,
        }
    }

    /// An invalid run: execution failed and no matches are reported.
    #[must_use]
    pub const fn failed(elapsed: Duration) -> Self {
        Self {
            matches: Vec::new(),
            elapsed,
            valid: false,
        }
    }

    /// Elapsed execution time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if the run has no matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Where evaluation of one (pattern, flags, text) input stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    /// Nothing evaluated yet.
    #[default]
    Idle,
    /// Compiling the pattern.
    Validating,
    /// The pattern failed to compile. Terminal for this input.
    Invalid {
        /// Compile error to show next to the pattern.
        message: String,
    },
    /// Running the compiled pattern.
    Executing,
    /// Evaluation finished.
    Ready(MatchRun),
}

impl RunState {
    /// The finished run, if any.
    #[must_use]
    pub const fn run(&self) -> Option<&MatchRun> {
        match self {
            Self::Ready(run) => Some(run),
            _ => None,
        }
    }

    /// The compile error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid { message } => Some(message),
            _ => None,
        }
    }

    /// Check if this state is terminal for its input.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Ready(_))
    }
}

/// Drives a [`RegexPrimitive`] to produce match runs.
#[derive(Clone)]
pub struct MatchEngine {
    primitive: Arc<dyn RegexPrimitive>,
}

impl MatchEngine {
    /// Create an engine over the given primitive.
    #[must_use]
    pub fn new(primitive: Arc<dyn RegexPrimitive>) -> Self {
        Self { primitive }
    }

    /// Create an engine over the `regex` crate.
    #[must_use]
    pub fn native(config: &EngineConfig) -> Self {
        Self::new(Arc::new(NativeRegex::new(config)))
    }

    /// Check whether `pattern` compiles under `flags`. Empty patterns are always valid.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::PatternCompile`] describing the failure.
    pub fn validate(&self, pattern: &str, flags: FlagSet) -> Result<()> {
        if pattern.is_empty() {
            return Ok(());
        }
        self.primitive.compile(pattern, &flags.encode()).map(|_| ())
    }

    /// Execute `pattern` against `text`.
    ///
    /// Empty patterns and empty text short-circuit to [`MatchRun::empty`]
    /// without touching the primitive. A pattern that fails to compile or a
    /// search that fails yields an invalid run.
    #[must_use]
    pub fn run(&self, pattern: &str, flags: FlagSet, text: &str) -> MatchRun {
        if pattern.is_empty() || text.is_empty() {
            return MatchRun::empty();
        }
        match self.primitive.compile(pattern, &flags.encode()) {
            Ok(matcher) => execute(matcher.as_ref(), flags, text),
            Err(e) => {
                warn!(error = %e, "Pattern failed to compile during run");
                MatchRun::failed(Duration::ZERO)
            }
        }
    }

    /// Walk the full state machine for one input and return the terminal state.
    #[must_use]
    pub fn evaluate(&self, pattern: &str, flags: FlagSet, text: &str) -> RunState {
        self.evaluate_observed(pattern, flags, text, |_| {})
    }

    /// Like [`evaluate`](Self::evaluate), reporting each transient state as it is entered.
    ///
    /// `observe` always sees [`RunState::Validating`] first, then
    /// [`RunState::Executing`] once the pattern has compiled. The terminal
    /// state is returned, not observed.
    pub fn evaluate_observed(
        &self,
        pattern: &str,
        flags: FlagSet,
        text: &str,
        mut observe: impl FnMut(&RunState),
    ) -> RunState {
        debug!(pattern, flags = %flags, text_len = text.len(), "Validating");
        observe(&RunState::Validating);
        if pattern.is_empty() || text.is_empty() {
            return RunState::Ready(MatchRun::empty());
        }

        let matcher = match self.primitive.compile(pattern, &flags.encode()) {
            Ok(matcher) => matcher,
            Err(e) => {
                let message = e.compile_message().map_or_else(|| e.to_string(), str::to_string);
                debug!(error = %message, "Pattern invalid");
                return RunState::Invalid { message };
            }
        };

        debug!("Executing");
        observe(&RunState::Executing);
        let run = execute(matcher.as_ref(), flags, text);
        debug!(
            matches = run.len(),
            valid = run.valid,
            elapsed_ms = run.elapsed_ms(),
            "Ready"
        );
        RunState::Ready(run)
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine").finish_non_exhaustive()
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::native(&EngineConfig::default())
    }
}

/// Time the collection of every match and package the outcome.
fn execute(matcher: &dyn CompiledMatcher, flags: FlagSet, text: &str) -> MatchRun {
    let started = Instant::now();
    let collected = collect_matches(matcher, flags.global, text);
    let elapsed = started.elapsed();

    match collected {
        Ok(matches) => MatchRun {
            matches,
            elapsed,
            valid: true,
        },
        Err(e) => {
            warn!(error = %e, "Match execution failed");
            MatchRun::failed(elapsed)
        }
    }
}

fn collect_matches(matcher: &dyn CompiledMatcher, global: bool, text: &str) -> Result<Vec<Match>> {
    let mut matches = Vec::new();
    let mut position = 0;

    while position <= text.len() {
        let Some(raw) = matcher.exec_from(text, position)? else {
            break;
        };
        let found = to_match(text, raw, position)?;

        if !global {
            matches.push(found);
            break;
        }

        position = if found.is_empty() {
            next_char_boundary(text, found.start_index)
        } else {
            found.end_index
        };
        matches.push(found);
    }

    Ok(matches)
}

/// Check a raw match against the text and convert it.
fn to_match(text: &str, raw: RawMatch, searched_from: usize) -> Result<Match> {
    let start = raw.index;
    let Some(end) = start.checked_add(raw.text.len()) else {
        return Err(LabError::match_execution(format!(
            "match at {start} with length {} overflows the sample offset",
            raw.text.len()
        )));
    };

    if start < searched_from || end > text.len() {
        return Err(LabError::match_execution(format!(
            "match {start}..{end} lies outside the searchable range {searched_from}..{}",
            text.len()
        )));
    }
    if text.get(start..end) != Some(raw.text.as_str()) {
        return Err(LabError::match_execution(format!(
            "match text does not agree with the sample at {start}..{end}"
        )));
    }

    Ok(Match {
        text: raw.text,
        start_index: start,
        end_index: end,
        groups: raw.groups,
    })
}

/// The byte offset of the character after the one at `index`, or one past the end.
fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(index + 1, |c| index + c.len_utf8())
}
