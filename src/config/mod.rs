//! Configuration management for the raft key/value store.
//!
//! Provides hierarchical configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML config file
//! 3. Environment variables with the `KVSTORE__` prefix (highest priority)

mod engine;
pub use engine::*;


//---
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::constants::CONFIG_ENV_PREFIX;
use crate::constants::CONFIG_ENV_SEPARATOR;
use crate::Result;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Underlying key/value engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl StoreConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Hardcoded defaults
    /// 2. Config file at `path`, when given (must exist)
    /// 3. Environment variables, e.g. `KVSTORE__ENGINE__CACHE_CAPACITY`
    ///
    /// The merged result is validated before it is returned.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("loading store config from {}", path);
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .separator(CONFIG_ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: StoreConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()
    }
}
