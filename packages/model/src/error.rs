use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
