use crate::domain::KBucketConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and embedding. For deployments, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: KBucketConfig,
}

impl StaticConfigProvider {
    /// Create with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specified bucket limits.
    #[must_use]
    pub fn with_config(mut self, config: KBucketConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn kbucket_config(&self) -> KBucketConfig {
        self.config
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading (requires "config" feature)
// ============================================================================

#[cfg(any(test, feature = "config"))]
mod toml_config {
    use super::*;
    use crate::domain::ConfigError;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        kbucket: KBucketConfigFile,
    }

    #[derive(Debug, Deserialize, Default)]
    struct KBucketConfigFile {
        max_bucket_size: Option<usize>,
        max_peers_per_ip: Option<usize>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [kbucket]
    /// max_bucket_size = 16
    /// max_peers_per_ip = 3
    /// ```
    ///
    /// Missing keys fall back to the defaults.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: KBucketConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed, or holds
        /// out-of-range limits.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let defaults = KBucketConfig::default();
            let kc = file.kbucket;
            let config = KBucketConfig {
                max_bucket_size: kc.max_bucket_size.unwrap_or(defaults.max_bucket_size),
                max_peers_per_ip: kc.max_peers_per_ip.unwrap_or(defaults.max_peers_per_ip),
            };
            config.validate()?;

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn kbucket_config(&self) -> KBucketConfig {
            self.config
        }
    }

}

#[cfg(any(test, feature = "config"))]
pub use toml_config::TomlConfigProvider;
