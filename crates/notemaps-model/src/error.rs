use notemaps_delta::DeltaError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(String),
    #[error("invalid element type: {0:?}")]
    InvalidElementType(String),
    #[error(transparent)]
    Delta(#[from] DeltaError),
}
