use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Startup settings for the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Capacity of each store's request channel.
    ///
    /// **Environment variables**:
    /// - `COURSE_REGISTRY_BUFFER_SIZE`
    pub buffer_size: usize,
    /// Filter used when `RUST_LOG` is not set.
    ///
    /// **Environment variables**:
    /// - `COURSE_REGISTRY_LOG_FILTER`
    pub log_filter: String,
}

impl RegistryConfig {
    pub const ENV_PREFIX: &'static str = "COURSE_REGISTRY_";
    const DEFAULT_BUFFER_SIZE: usize = 32;

    /// Defaults merged with `COURSE_REGISTRY_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(Self::ENV_PREFIX))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        if config.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(config)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
            log_filter: "info".to_string(),
        }
    }
}
