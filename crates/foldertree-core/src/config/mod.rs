//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file merged with
//! `FOLDERTREE__*` environment variables via the `config` crate. Every
//! field carries a serde default, so an absent file yields
//! [`AppConfig::default`].

pub mod logging;
pub mod persistence;
pub mod storage;
pub mod tree;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::persistence::PersistenceConfig;
use self::storage::StorageConfig;
use self::tree::TreeConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Drag geometry.
    #[serde(default)]
    pub tree: TreeConfig,
    /// Parent-update retry and rollback policy.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Folder record storage.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `FOLDERTREE` (sections separated by `__`) override file values.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FOLDERTREE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.tree.indent_width_px.is_finite() && self.tree.indent_width_px > 0.0) {
            return Err(AppError::configuration(format!(
                "tree.indent_width_px must be positive, got {}",
                self.tree.indent_width_px
            )));
        }
        if !(self.tree.activation_distance_px.is_finite()
            && self.tree.activation_distance_px >= 0.0)
        {
            return Err(AppError::configuration(format!(
                "tree.activation_distance_px must not be negative, got {}",
                self.tree.activation_distance_px
            )));
        }
        if self.persistence.max_attempts == 0 {
            return Err(AppError::configuration(
                "persistence.max_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}
