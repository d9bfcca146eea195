//! Engine configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables prefixed with `INTENT_ENGINE_` (double underscore for nesting,
//! e.g. `INTENT_ENGINE_RANKING__DEFAULT_PAGE_SIZE=20`).

use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::logging::LoggingConfig;
use crate::ranking::{CacheConfig, RankingConfig};
use crate::scoring::ScoringConfig;

const ENV_PREFIX: &str = "INTENT_ENGINE";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from a TOML file plus environment overrides.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::Configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let source = ::config::Config::builder()
            .add_source(File::from(path))
            .add_source(Self::environment())
            .build()?;

        debug!("Loaded configuration from {}", path.display());
        Self::deserialize_source(source)
    }

    /// Parse TOML text without consulting the environment
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let source = ::config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::deserialize_source(source)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    // Round-trip through JSON so enum-keyed maps (weight overrides) deserialize.
    fn deserialize_source(source: ::config::Config) -> Result<Self> {
        let value: serde_json::Value = source.try_deserialize()?;
        let config: Config = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the flat environment overrides
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("INTENT_ENGINE_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                self.ranking.default_page_size = size;
            }
        }

        if let Ok(val) = std::env::var("INTENT_ENGINE_CACHE_ENABLED") {
            self.cache.enabled = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("INTENT_ENGINE_LOG_LEVEL") {
            self.logging.level = val;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scoring.weakness_below > 100 || self.scoring.warning_below > 100 {
            return Err(EngineError::Configuration(
                "score thresholds must be within 0..=100".to_string(),
            ));
        }

        if self.scoring.warning_below > self.scoring.weakness_below {
            return Err(EngineError::Configuration(format!(
                "warning_below ({}) must not exceed weakness_below ({})",
                self.scoring.warning_below, self.scoring.weakness_below
            )));
        }

        self.scoring.weight_table()?;

        if self.ranking.default_page_size == 0 || self.ranking.max_page_size == 0 {
            return Err(EngineError::Configuration(
                "page sizes must be positive".to_string(),
            ));
        }

        if self.ranking.default_page_size > self.ranking.max_page_size {
            return Err(EngineError::Configuration(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.ranking.default_page_size, self.ranking.max_page_size
            )));
        }

        if self.cache.enabled && (self.cache.max_entries == 0 || self.cache.ttl_secs == 0) {
            return Err(EngineError::Configuration(
                "an enabled cache needs positive max_entries and ttl_secs".to_string(),
            ));
        }

        self.logging.env_filter()?;

        Ok(())
    }
}
