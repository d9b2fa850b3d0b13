use thiserror::Error;

pub type RedactResult<T> = Result<T, RedactError>;

#[derive(Debug, Error)]
pub enum RedactError {
    /// The body is not a well-formed JSON document.
    #[error("body is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
