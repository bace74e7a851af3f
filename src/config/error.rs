//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Lambda string could not be parsed as a float.
    #[error("failed to parse MMR lambda '{value}': {source}")]
    LambdaParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Lambda value is outside the documented [0, 1] range.
    #[error("invalid MMR lambda {value}: must be within [0, 1]")]
    LambdaOutOfRange { value: f64 },

    /// Embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,

    /// A TTL or window duration was configured as zero.
    #[error("duration '{name}' cannot be zero")]
    ZeroDuration { name: &'static str },

    /// The scan pool size cannot be zero (the reranker would have no input).
    #[error("scan top_n cannot be zero")]
    ZeroScanPool,
}
