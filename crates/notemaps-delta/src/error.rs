use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeltaError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// A retain or remove at `index` would move the cursor past the end of
    /// the base string.
    #[error("op {index} needs {length} chars at offset {cursor}, base has {base_len}")]
    OutOfRange {
        index: usize,
        cursor: usize,
        length: usize,
        base_len: usize,
    },
}
