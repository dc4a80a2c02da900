//! Configuration types for regex-lab.
//!
//! Every section has working defaults, so an empty TOML document is a valid
//! configuration. Values can be overridden from `REGEX_LAB_*` environment
//! variables through [`LabConfig::apply_env`].

mod env;

pub use env::{DEFAULT_PREFIX, EnvConfig};

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};
use crate::flags::FlagSet;
use crate::library::DEFAULT_STORAGE_KEY;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default compiled-program size limit for the native primitive (10 MiB).
pub const DEFAULT_SIZE_LIMIT: usize = 10 * 1024 * 1024;

/// Default lazy-DFA cache size limit for the native primitive (2 MiB).
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * 1024 * 1024;

/// Default number of undo entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Match engine settings.
    pub engine: EngineConfig,
    /// Pattern editor settings.
    pub editor: EditorConfig,
    /// Interactive session settings.
    pub session: SessionConfig,
    /// Pattern library settings.
    pub library: LibraryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl LabConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Config`] if the document is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LabError::config(e.to_string()))
    }

    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = LabError::with_io_context(
            std::fs::read_to_string(path),
            format!("reading config {}", path.display()),
        )?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LabError::config(e.to_string()))
    }

    /// Override fields from environment variables.
    #[must_use]
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(ms) = env.parse::<u64>("DEBOUNCE_MS") {
            self.session.debounce_ms = ms;
        }
        if let Some(flags) = env.get("DEFAULT_FLAGS") {
            self.session.default_flags = flags;
        }
        if let Some(dir) = env.get("STORAGE_DIR") {
            self.library.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = env.get("STORAGE_KEY") {
            self.library.storage_key = key;
        }
        if let Some(size) = env.parse::<usize>("CACHE_SIZE") {
            self.engine.cache_size = size;
        }
        if let Some(filter) = env.get("LOG_FILTER") {
            self.logging.filter = filter;
        }
        if let Some(format) = env.get("LOG_FORMAT").and_then(|f| LogFormat::parse(&f)) {
            self.logging.format = format;
        }
        self
    }

    /// Load `path` if given, otherwise defaults, then apply `REGEX_LAB_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or parsed.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.apply_env(&EnvConfig::default()))
    }
}

/// Settings for the match engine and its native primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of compiled regexes kept.
    pub cache_size: usize,
    /// Compiled program size limit in bytes.
    pub size_limit: usize,
    /// Lazy DFA cache size limit in bytes.
    pub dfa_size_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_size: crate::engine::DEFAULT_CACHE_SIZE,
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

/// Settings for the pattern editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo entries; unset means unbounded.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

/// Settings for interactive sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period before a change triggers a run.
    pub debounce_ms: u64,
    /// Flag string a new session starts with.
    pub default_flags: String,
}

impl SessionConfig {
    /// The debounce window as a duration.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The starting flag set.
    #[must_use]
    pub fn flags(&self) -> FlagSet {
        FlagSet::decode(&self.default_flags)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_flags: "g".to_string(),
        }
    }
}

/// Settings for the pattern library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory for persisted user patterns; unset keeps them in memory.
    pub storage_dir: Option<PathBuf>,
    /// Key the user set is stored under.
    pub storage_key: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Settings for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "regex_lab=info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(LabConfig::from_toml_str("").unwrap(), LabConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            [session]
            debounce_ms = 50

            [library]
            storage_dir = "/tmp/patterns"
            "#,
        )
        .unwrap();
        assert_eq!(config.session.debounce(), Duration::from_millis(50));
        assert_eq!(config.session.default_flags, "g");
        assert_eq!(config.library.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(
            config.library.storage_dir.as_deref(),
            Some(Path::new("/tmp/patterns"))
        );
    }

    #[test]
    fn bad_types_are_config_errors() {
        let err = LabConfig::from_toml_str("[session]\ndebounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, LabError::Config { .. }));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = LabConfig::default();
        config.logging.format = LogFormat::Json;
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(LabConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn log_format_names() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }
}
