//! Shareable links.
//!
//! A pattern and its flags travel as the query string
//! `pattern=<pattern>&flags=<flags>`, percent-encoded so any pattern text
//! survives the trip.

use url::Url;
use url::form_urlencoded;

use crate::error::{LabError, Result};
use crate::flags::FlagSet;

const PATTERN_PARAM: &str = "pattern";
const FLAGS_PARAM: &str = "flags";

/// A pattern with its flags, as carried by a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SharedPattern {
    /// Pattern source.
    pub pattern: String,
    /// Flags.
    pub flags: FlagSet,
}

impl SharedPattern {
    /// Bundle a pattern and flags.
    #[must_use]
    pub fn new(pattern: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            pattern: pattern.into(),
            flags,
        }
    }

    /// Encode as a query string without the leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PATTERN_PARAM, &self.pattern)
            .append_pair(FLAGS_PARAM, &self.flags.encode())
            .finish()
    }

    /// Decode a query string, with or without a leading `?`.
    ///
    /// Returns `None` if there is no pattern parameter. A missing flags
    /// parameter means no flags.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut pattern = None;
        let mut flags = FlagSet::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PATTERN_PARAM => pattern = Some(value.into_owned()),
                FLAGS_PARAM => flags = FlagSet::decode(&value),
                _ => {}
            }
        }

        pattern.map(|pattern| Self { pattern, flags })
    }

    /// Attach the query to `base`, replacing any existing query.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Config`] if `base` is not an absolute URL.
    pub fn to_url(&self, base: &str) -> Result<String> {
        let mut url =
            Url::parse(base).map_err(|e| LabError::config(format!("invalid base URL: {e}")))?;
        url.set_query(Some(&self.to_query()));
        Ok(url.into())
    }

    /// Extract the shared pattern from a full URL.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Config`] if `link` is not a URL.
    pub fn from_url(link: &str) -> Result<Option<Self>> {
        let url = Url::parse(link).map_err(|e| LabError::config(format!("invalid link: {e}")))?;
        Ok(url.query().and_then(Self::from_query))
    }
}
