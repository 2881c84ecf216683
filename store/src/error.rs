//! Errors for input the store refuses before touching the tree.
//!
//! A missing id is never an error; lookups and removals report it through
//! `Option` or `bool`.

use thiserror::Error;

/// Reasons the store refuses an operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Prices must be finite and `>= 0`.
    #[error("price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),

    /// Every id up to `ItemId::MAX` has been handed out or imported.
    #[error("no ids left to assign")]
    IdsExhausted,

    /// An imported payload was not a JSON array of records.
    #[error("malformed record payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
