//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SIFT_*` environment variables.
//! Cache durations are explicit configuration threaded into constructors
//! (rather than embedded constants) so tests can use short TTLs
//! deterministically.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY_BYTES, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_TTL_SECS,
    DEFAULT_MMR_LAMBDA, DEFAULT_MMR_TOP_K, DEFAULT_RESULTS_TTL_SECS, DEFAULT_SCAN_TOP_N,
    DEFAULT_SLIDING_WINDOW_SECS,
};

/// Retrieval configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIFT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding vector dimension, fixed by the provider in use. Default: `1536`.
    pub embedding_dim: usize,

    /// Absolute TTL for cached embeddings. Default: 30 days.
    pub embedding_ttl: Duration,

    /// Absolute TTL for cached result lists. Default: 15 minutes.
    pub results_ttl: Duration,

    /// Sliding-expiration window for cached result lists. Default: 5 minutes.
    pub sliding_window: Duration,

    /// Cache size budget in approximate bytes. Default: 256 MiB.
    pub cache_capacity_bytes: u64,

    /// Candidate pool size produced by the similarity scan. Default: `50`.
    pub scan_top_n: usize,

    /// Number of results selected by MMR. Default: `10`.
    pub mmr_top_k: usize,

    /// MMR relevance/diversity trade-off, within [0, 1]. Default: `0.5`.
    pub mmr_lambda: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embedding_ttl: Duration::from_secs(DEFAULT_EMBEDDING_TTL_SECS),
            results_ttl: Duration::from_secs(DEFAULT_RESULTS_TTL_SECS),
            sliding_window: Duration::from_secs(DEFAULT_SLIDING_WINDOW_SECS),
            cache_capacity_bytes: DEFAULT_CACHE_CAPACITY_BYTES,
            scan_top_n: DEFAULT_SCAN_TOP_N,
            mmr_top_k: DEFAULT_MMR_TOP_K,
            mmr_lambda: DEFAULT_MMR_LAMBDA,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_DIM: &'static str = "SIFT_EMBEDDING_DIM";
    const ENV_EMBEDDING_TTL_SECS: &'static str = "SIFT_EMBEDDING_TTL_SECS";
    const ENV_RESULTS_TTL_SECS: &'static str = "SIFT_RESULTS_TTL_SECS";
    const ENV_SLIDING_WINDOW_SECS: &'static str = "SIFT_SLIDING_WINDOW_SECS";
    const ENV_CACHE_CAPACITY_BYTES: &'static str = "SIFT_CACHE_CAPACITY_BYTES";
    const ENV_SCAN_TOP_N: &'static str = "SIFT_SCAN_TOP_N";
    const ENV_MMR_TOP_K: &'static str = "SIFT_MMR_TOP_K";
    const ENV_MMR_LAMBDA: &'static str = "SIFT_MMR_LAMBDA";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);
        let embedding_ttl =
            Self::parse_secs_from_env(Self::ENV_EMBEDDING_TTL_SECS, defaults.embedding_ttl);
        let results_ttl =
            Self::parse_secs_from_env(Self::ENV_RESULTS_TTL_SECS, defaults.results_ttl);
        let sliding_window =
            Self::parse_secs_from_env(Self::ENV_SLIDING_WINDOW_SECS, defaults.sliding_window);
        let cache_capacity_bytes = Self::parse_u64_from_env(
            Self::ENV_CACHE_CAPACITY_BYTES,
            defaults.cache_capacity_bytes,
        );
        let scan_top_n = Self::parse_usize_from_env(Self::ENV_SCAN_TOP_N, defaults.scan_top_n);
        let mmr_top_k = Self::parse_usize_from_env(Self::ENV_MMR_TOP_K, defaults.mmr_top_k);
        let mmr_lambda = Self::parse_lambda_from_env(defaults.mmr_lambda)?;

        Ok(Self {
            embedding_dim,
            embedding_ttl,
            results_ttl,
            sliding_window,
            cache_capacity_bytes,
            scan_top_n,
            mmr_top_k,
            mmr_lambda,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if !(0.0..=1.0).contains(&self.mmr_lambda) {
            return Err(ConfigError::LambdaOutOfRange {
                value: self.mmr_lambda,
            });
        }
        if self.embedding_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "embedding_ttl",
            });
        }
        if self.results_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "results_ttl",
            });
        }
        if self.sliding_window.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "sliding_window",
            });
        }
        if self.scan_top_n == 0 {
            return Err(ConfigError::ZeroScanPool);
        }
        Ok(())
    }

    fn parse_lambda_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_MMR_LAMBDA) {
            Ok(value) => {
                let lambda: f64 = value.parse().map_err(|e| ConfigError::LambdaParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if !(0.0..=1.0).contains(&lambda) {
                    return Err(ConfigError::LambdaOutOfRange { value: lambda });
                }

                Ok(lambda)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
