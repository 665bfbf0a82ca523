use models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("format error: {0}")]
    Format(String),
}

impl ServiceError {
    pub fn not_found(id: i64) -> Self { Self::NotFound(format!("employee {id} not found")) }

    pub fn duplicate(id: i64) -> Self { Self::DuplicateKey(format!("employee id {id} already exists")) }

    /// Whether the failure comes from the caller's input rather than the backing store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateKey(_) | Self::NotFound(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Shape(msg) => Self::Format(msg),
        }
    }
}
