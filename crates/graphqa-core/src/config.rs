//! Configuration management for graphqa services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (GRAPHQA__ prefix, `__` between sections and keys)
//! 2. Config file (graphqa.toml, or the prefix passed on the command line)
//! 3. Defaults
//!
//! Each crate owns the struct for its section (`[neo4j]`, `[llm]`, `[eval]`)
//! and loads it through [`load_section`].

use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Default config file prefix (resolves to `graphqa.toml`).
pub const DEFAULT_CONFIG_PREFIX: &str = "graphqa";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GRAPHQA";

/// Load one section of the layered configuration.
///
/// A section missing from every source yields `T::default()`; a section
/// that is present but malformed is an error.
pub fn load_section<T>(file_prefix: &str, section: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| CoreError::Config(e.to_string()))?;

    match cfg.get::<T>(section) {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => {
            tracing::debug!(section, "Config section not found, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(CoreError::Config(format!("[{section}]: {e}"))),
    }
}
