//! Configuration for Memora.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::errors::MemoraError;
use crate::MemoraResult;

/// Main configuration for Memora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Memoizer settings.
    #[serde(default)]
    pub memo: MemoConfig,
}

/// LRU cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache capacity (number of entries).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Entry time to live in seconds.
    ///
    /// A TTL of zero means entries are considered expired immediately.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Entry time to live as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validates the settings.
    ///
    /// A zero capacity is a configuration error, reported here rather than
    /// deferred to first use.
    pub fn validate(&self) -> MemoraResult<()> {
        if self.capacity == 0 {
            return Err(MemoraError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

/// Memoizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of memoized results.
    #[serde(default = "default_memo_capacity")]
    pub capacity: usize,
}

impl MemoConfig {
    /// Validates the settings.
    pub fn validate(&self) -> MemoraResult<()> {
        if self.capacity == 0 {
            return Err(MemoraError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_memo_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_memo_capacity() -> usize {
    256
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> MemoraResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MemoraResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            cache: CacheConfig::default(),
            memo: MemoConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("memora.toml").unwrap_or_else(|_| Self::default_config())
    }

    /// Validates every section.
    pub fn validate(&self) -> MemoraResult<()> {
        self.cache.validate()?;
        self.memo.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default_config();
        assert_eq!(config.cache.capacity, 1000);
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(config.memo.enabled);
        assert_eq!(config.memo.capacity, 256);
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = CacheConfig {
            capacity: 0,
            ttl_secs: 300,
        };
        assert!(matches!(
            config.validate(),
            Err(MemoraError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default_config().validate().is_ok());
    }

    #[test]
    fn test_ttl_conversion() {
        let config = CacheConfig {
            capacity: 10,
            ttl_secs: 60,
        };
        assert_eq!(config.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memora.toml");

        let mut config = Config::default_config();
        config.cache.capacity = 42;
        config.memo.enabled = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.cache.capacity, 42);
        assert!(!loaded.memo.enabled);
        assert_eq!(loaded.cache.ttl_secs, 300);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[cache]\ncapacity = 7\n").unwrap();
        assert_eq!(config.cache.capacity, 7);
        // Campos omitidos caem nos padrões
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.memo.capacity, 256);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/memora.toml").is_err());
    }
}
