//! Match flags and their single-letter string form.
//!
//! The flag string is the representation handed to the matching primitive
//! and embedded in shareable links. Encoding always emits letters in the
//! canonical order `g i m s u y`; decoding accepts any order and ignores
//! duplicates and unknown letters.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single match flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Find every match instead of only the first.
    Global,
    /// Case-insensitive matching.
    IgnoreCase,
    /// `^` and `$` match at line boundaries.
    Multiline,
    /// `.` also matches newlines.
    DotAll,
    /// Unicode-aware matching.
    Unicode,
    /// Matches must start exactly at the search position.
    Sticky,
}

impl Flag {
    /// All flags in canonical encoding order.
    pub const ALL: [Self; 6] = [
        Self::Global,
        Self::IgnoreCase,
        Self::Multiline,
        Self::DotAll,
        Self::Unicode,
        Self::Sticky,
    ];

    /// The single-letter code for this flag.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Global => 'g',
            Self::IgnoreCase => 'i',
            Self::Multiline => 'm',
            Self::DotAll => 's',
            Self::Unicode => 'u',
            Self::Sticky => 'y',
        }
    }

    /// Look up a flag by its letter.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'g' => Some(Self::Global),
            'i' => Some(Self::IgnoreCase),
            'm' => Some(Self::Multiline),
            's' => Some(Self::DotAll),
            'u' => Some(Self::Unicode),
            'y' => Some(Self::Sticky),
            _ => None,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::IgnoreCase => "ignore case",
            Self::Multiline => "multiline",
            Self::DotAll => "dot all",
            Self::Unicode => "unicode",
            Self::Sticky => "sticky",
        }
    }
}

/// Six independent match flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct FlagSet {
    /// `g`
    pub global: bool,
    /// `i`
    pub ignore_case: bool,
    /// `m`
    pub multiline: bool,
    /// `s`
    pub dot_all: bool,
    /// `u`
    pub unicode: bool,
    /// `y`
    pub sticky: bool,
}

impl FlagSet {
    /// An empty flag set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            global: false,
            ignore_case: false,
            multiline: false,
            dot_all: false,
            unicode: false,
            sticky: false,
        }
    }

    /// Decode a flag string. Every string decodes to some flag set.
    #[must_use]
    pub fn decode(s: &str) -> Self {
        s.chars()
            .filter_map(Flag::from_code)
            .fold(Self::new(), |set, flag| set.with(flag, true))
    }

    /// Encode as a canonical flag string.
    #[must_use]
    pub fn encode(&self) -> String {
        Flag::ALL
            .iter()
            .filter(|flag| self.contains(**flag))
            .map(|flag| flag.code())
            .collect()
    }

    /// Check whether a flag is set.
    #[must_use]
    pub const fn contains(&self, flag: Flag) -> bool {
        match flag {
            Flag::Global => self.global,
            Flag::IgnoreCase => self.ignore_case,
            Flag::Multiline => self.multiline,
            Flag::DotAll => self.dot_all,
            Flag::Unicode => self.unicode,
            Flag::Sticky => self.sticky,
        }
    }

    /// Set or clear a flag.
    pub const fn set(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::Global => self.global = on,
            Flag::IgnoreCase => self.ignore_case = on,
            Flag::Multiline => self.multiline = on,
            Flag::DotAll => self.dot_all = on,
            Flag::Unicode => self.unicode = on,
            Flag::Sticky => self.sticky = on,
        }
    }

    /// Builder-style [`FlagSet::set`].
    #[must_use]
    pub const fn with(mut self, flag: Flag, on: bool) -> Self {
        self.set(flag, on);
        self
    }

    /// Flip a flag, returning its new state.
    pub const fn toggle(&mut self, flag: Flag) -> bool {
        let on = !self.contains(flag);
        self.set(flag, on);
        on
    }

    /// Iterate over the flags that are set, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }

    /// Check whether no flag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.global
            || self.ignore_case
            || self.multiline
            || self.dot_all
            || self.unicode
            || self.sticky)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for FlagSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl From<&str> for FlagSet {
    fn from(s: &str) -> Self {
        Self::decode(s)
    }
}
