use thiserror::Error;

/// Storage error type.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt row: {message}")]
    CorruptRow { message: String },
}

impl StoreError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptRow {
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
