use thiserror::Error;

/// Errors raised while loading the documentation set.
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid documentation file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type DocsResult<T> = Result<T, DocsError>;
