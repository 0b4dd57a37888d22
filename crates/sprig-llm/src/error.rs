use thiserror::Error;

/// Unified error type for generation calls.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("api error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type LlmResult<T> = Result<T, LlmError>;
