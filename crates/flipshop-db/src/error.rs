//! # Store Layer Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (memdb)          CoreError (flipshop-core)                  │
//! │       │                           │                                     │
//! │       └──────────┬────────────────┘                                     │
//! │                  ▼                                                      │
//! │  DbError (this module) ← adds entity context                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in shop-api) ← status code + JSON body                       │
//! │                                                                         │
//! │  Any DbError returned from a transaction handler rolls it back.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flipshop_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::memdb::StoreError;

/// Errors raised inside repositories and transaction handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// No item stored under this SKU.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// No cart stored under this id.
    #[error("cart not found: {0}")]
    CartNotFound(String),

    /// An item with this SKU already exists.
    #[error("item already exists: {0}")]
    DuplicateItem(String),

    /// A domain invariant refused the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raw store failure (missing key, wrong value type).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Core(err.into())
    }
}

/// Result type for store layer operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: DbError = CoreError::CartNotAvailable {
            cart_id: "abc".into(),
        }
        .into();
        assert_eq!(err.to_string(), "cart abc is not available");
    }
}
