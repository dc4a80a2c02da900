//! Environment-based configuration.

use std::collections::HashMap;

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "REGEX_LAB";

/// Environment variable reader.
///
/// Lookups go through an optional override map first, which lets tests
/// supply values without touching the process environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Values that take precedence over the process environment.
    overrides: HashMap<String, String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a new environment config reader.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            overrides: HashMap::new(),
        }
    }

    /// Supply a value for `name` (unprefixed) that shadows the environment.
    #[must_use]
    pub fn with_override(mut self, name: &str, value: impl Into<String>) -> Self {
        let var = self.var_name(name);
        self.overrides.insert(var, value.into());
        self
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let var_name = self.var_name(name);
        self.overrides
            .get(&var_name)
            .cloned()
            .or_else(|| std::env::var(&var_name).ok())
    }

    /// Get a parsed value. Unparseable values are treated as unset.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LabConfig, LogFormat};
    use std::path::Path;
    use std::time::Duration;

    fn env() -> EnvConfig {
        EnvConfig::new("REGEX_LAB_TEST_UNSET_PREFIX")
    }

    #[test]
    fn var_names_are_prefixed_and_uppercased() {
        assert_eq!(env().var_name("debounce_ms"), "REGEX_LAB_TEST_UNSET_PREFIX_DEBOUNCE_MS");
        assert_eq!(EnvConfig::new("").var_name("x"), "X");
    }

    #[test]
    fn overrides_shadow_environment() {
        let env = env().with_override("debounce_ms", " 25 ").with_override("cache_size", "lots");
        assert_eq!(env.parse::<u64>("debounce_ms"), Some(25));
        assert_eq!(env.parse::<usize>("cache_size"), None);
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn apply_env_overrides_config() {
        let env = env()
            .with_override("DEBOUNCE_MS", "120")
            .with_override("DEFAULT_FLAGS", "gi")
            .with_override("STORAGE_DIR", "/var/lib/regex-lab")
            .with_override("LOG_FORMAT", "json")
            .with_override("CACHE_SIZE", "not-a-number");
        let config = LabConfig::default().apply_env(&env);

        assert_eq!(config.session.debounce(), Duration::from_millis(120));
        assert_eq!(config.session.default_flags, "gi");
        assert_eq!(
            config.library.storage_dir.as_deref(),
            Some(Path::new("/var/lib/regex-lab"))
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.engine.cache_size, LabConfig::default().engine.cache_size);
    }
}
