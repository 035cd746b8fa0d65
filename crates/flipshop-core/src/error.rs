//! # Error Types
//!
//! Domain-specific error types for flipshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  flipshop-core errors (this file)                                      │
//! │  ├── CoreError        - Invariant violations (stock, cart status)      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  flipshop-db errors (separate crate)                                   │
//! │  └── DbError          - Not found, store failures, wrapped CoreError   │
//! │                                                                         │
//! │  shop-api errors (in app)                                              │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are ever corrected silently or retried: an invariant
//! violation always goes back to the caller.

use thiserror::Error;

use crate::item::Sku;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by `Item` and `Cart`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Not enough unreserved stock to hold the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// PUT /cart/{id}/purchase { sku: "234234", qty: 5 }
    ///      │
    ///      ▼
    /// item.reserve(5): available=2, reserved=0
    ///      │
    ///      ▼
    /// ReservationUnavailable { sku: "234234", requested: 5, available: 2 }
    ///      │
    ///      ▼
    /// 422 "there is not 5 item(s) 234234 available for reservation"
    /// ```
    #[error("there is not {requested} item(s) {sku} available for reservation")]
    ReservationUnavailable {
        sku: Sku,
        requested: i64,
        available: i64,
    },

    /// Releasing more than is currently reserved.
    #[error("cannot release {requested} of {sku}: only {reserved} reserved")]
    InvalidRelease {
        sku: Sku,
        requested: i64,
        reserved: i64,
    },

    /// Removing stock that was never reserved.
    #[error("cannot remove {requested} of {sku}: only {reserved} reserved")]
    InvalidRemoval {
        sku: Sku,
        requested: i64,
        reserved: i64,
    },

    /// The cart was already submitted.
    #[error("cart {cart_id} is not available")]
    CartNotAvailable { cart_id: String },

    /// The purchase would leave a negative quantity on the line.
    #[error("item quantity invalid: {sku} would have {resulting}")]
    InvalidQuantity { sku: Sku, resulting: i64 },

    /// A discount was addressed to a SKU with no purchase line.
    #[error("item {0} is not in the cart")]
    ItemNotInCart(Sku),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
