//! Configuration management for the reactive value engine.
//!
//! Provides hierarchical configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional engine config file
//! 3. Local overrides
//! 4. Environment variables (highest priority)

mod driver;
mod events;
pub use driver::*;
pub use events::*;


use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Native driver behavior defaults
    #[serde(default)]
    pub driver: DriverConfig,
    /// Inbound event channel parameters
    #[serde(default)]
    pub events: EventChannelConfig,
}

impl EngineConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Optional engine config file
    /// 2. Local overrides
    /// 3. Environment variables
    ///
    /// # Arguments
    /// * `config_path` - Optional path to an engine configuration file
    ///
    /// # Returns
    /// Merged and validated configuration
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        if let Some(path) = config_path {
            config = config.add_source(File::with_name(path).required(true));
        }

        // Local overrides
        config = config.add_source(File::with_name("config/local").required(false));

        // Environment variables (highest priority)
        config = config.add_source(
            Environment::with_prefix("RV")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let loaded: Self = config.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Validates all engine subsystem configurations
    pub fn validate(&self) -> Result<()> {
        self.events.validate()?;
        Ok(())
    }
}
