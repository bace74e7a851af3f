use thiserror::Error;

use crate::source::SourceError;

/// Hard failures of the retrieval pipeline.
///
/// Degraded states (no embedding available, empty candidate set, cache
/// trouble) are recovered locally and never reach this type; only faults the
/// core cannot absorb (the storage collaborator failing) propagate.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("vector source error: {0}")]
    Source(#[from] SourceError),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
