//! Configuration loading and validation for the `cbc-hmac` command.
//!
//! Values are read from `CBC_HMAC_*` environment variables.

use anyhow::{Context, Result};
use cbc_hmac::Algorithm;
use serde::Deserialize;

/// Validated command configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"warn"`, `"debug"`). Logs go to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Algorithm used when a request carries no `alg`.
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,

    /// Upper bound on the size of the JSON request read from stdin.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_algorithm() -> String {
    Algorithm::A256CbcHs512.name().into()
}
fn default_max_input_bytes() -> u64 {
    16 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_algorithm: default_algorithm(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CBC_HMAC").try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The configured default algorithm. Only valid after [`Config::validate`].
    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::resolve(&self.default_algorithm)
            .with_context(|| format!("CBC_HMAC_DEFAULT_ALGORITHM: {}", self.default_algorithm))
    }

    fn validate(&self) -> Result<()> {
        self.algorithm()?;
        if self.max_input_bytes == 0 {
            anyhow::bail!("CBC_HMAC_MAX_INPUT_BYTES must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("CBC_HMAC_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
