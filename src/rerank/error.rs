use thiserror::Error;

#[derive(Debug, Error)]
pub enum RerankError {
    #[error("rerank cancelled")]
    Cancelled,
}

pub type RerankResult<T> = Result<T, RerankError>;
