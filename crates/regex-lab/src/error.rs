//! Error types for regex-lab.
//!
//! Every failure the engine can hit is recovered locally: compile errors are
//! surfaced next to the pattern, execution failures degrade to an invalid
//! run, and persistence problems fall back to an empty user library. The
//! [`LabError`] values carry enough context to render a message for the user.

use thiserror::Error;

/// Maximum number of pattern characters echoed back in error messages.
const MAX_PATTERN_DISPLAY: usize = 80;

/// Shorten a pattern for display, marking truncation.
fn format_pattern_snippet(pattern: &str) -> String {
    if pattern.chars().count() <= MAX_PATTERN_DISPLAY {
        return pattern.to_string();
    }
    let head: String = pattern.chars().take(MAX_PATTERN_DISPLAY).collect();
    format!("{head}... ({} bytes)", pattern.len())
}

/// Format a compile error, keeping the primitive's own diagnostics intact.
fn format_compile_error(pattern: &str, message: &str) -> String {
    format!(
        "invalid pattern /{}/\n{message}",
        format_pattern_snippet(pattern)
    )
}

/// The main error type for regex-lab operations.
#[derive(Debug, Error)]
pub enum LabError {
    /// The pattern and flags failed to compile.
    #[error("{}", format_compile_error(pattern, message))]
    PatternCompile {
        /// The pattern source that was rejected.
        pattern: String,
        /// The primitive's description of the failure.
        message: String,
    },

    /// A compiled pattern failed while executing.
    #[error("match execution failed: {message}")]
    MatchExecution {
        /// Description of the failure.
        message: String,
    },

    /// Stored data could not be read or written.
    #[error("persistence error for key '{key}': {message}")]
    Persistence {
        /// The storage key involved.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// An import payload was not a well-formed pattern list.
    #[error("import rejected: {message}")]
    ImportFormat {
        /// Why the payload was rejected.
        message: String,
    },

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred with additional context.
    #[error("{context}: {source}")]
    IoWithContext {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for regex-lab operations.
pub type Result<T> = std::result::Result<T, LabError>;

impl LabError {
    /// Create a pattern compile error.
    pub fn pattern_compile(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PatternCompile {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a match execution error.
    pub fn match_execution(message: impl Into<String>) -> Self {
        Self::MatchExecution {
            message: message.into(),
        }
    }

    /// Create a persistence error.
    pub fn persistence(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an import format error.
    pub fn import_format(message: impl Into<String>) -> Self {
        Self::ImportFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoWithContext {
            context: context.into(),
            source,
        }
    }

    /// Wrap an I/O result with context.
    pub fn with_io_context<T>(result: std::io::Result<T>, context: impl Into<String>) -> Result<T> {
        result.map_err(|e| Self::io_context(context, e))
    }

    /// Check if this is a pattern compile error.
    #[must_use]
    pub const fn is_compile_error(&self) -> bool {
        matches!(self, Self::PatternCompile { .. })
    }

    /// Check if this is an import rejection.
    #[must_use]
    pub const fn is_import_error(&self) -> bool {
        matches!(self, Self::ImportFormat { .. })
    }

    /// The primitive's message for a compile error, without the pattern echo.
    #[must_use]
    pub fn compile_message(&self) -> Option<&str> {
        match self {
            Self::PatternCompile { message, .. } => Some(message),
            _ => None,
        }
    }
}
