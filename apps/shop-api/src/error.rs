//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Flipshop                               │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                     │
//! │         │                                                               │
//! │         ├── ValidationError ──────────────┐                             │
//! │         │                                 │                             │
//! │         ├── DbError ─┬── ItemNotFound ────┤                             │
//! │         │            ├── CartNotFound ────┤                             │
//! │         │            ├── DuplicateItem ───┼──► ApiError { code, msg }   │
//! │         │            ├── Core(CoreError) ─┤          │                  │
//! │         │            └── Store(..) ───────┘          ▼                  │
//! │         │                                   status + JSON body          │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────► 200/201 + JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Body shape:
//! ```json
//! { "code": "INSUFFICIENT_STOCK", "message": "there is not 5 item(s) 234234 available for reservation" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flipshop_core::{CoreError, ValidationError};
use flipshop_db::{DbError, StoreError};
use serde::Serialize;

/// API error returned from HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (422)
    ValidationError,

    /// Not enough unreserved stock (422)
    InsufficientStock,

    /// Cart is submitted, or the ledger refused the change (422)
    CartError,

    /// Stock counters refused the change (422)
    BusinessLogic,

    /// An item with this SKU already exists (422)
    Duplicate,

    /// Store failure (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ValidationError
            | ErrorCode::InsufficientStock
            | ErrorCode::CartError
            | ErrorCode::BusinessLogic
            | ErrorCode::Duplicate => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }

    /// Maps errors raised while changing a cart.
    ///
    /// The cart in the path exists, so an unknown SKU in the body is an
    /// unprocessable request rather than a missing resource.
    pub fn from_cart_change(err: DbError) -> Self {
        match err {
            DbError::ItemNotFound(sku) => {
                ApiError::validation(format!("item not found: {}", sku))
            }
            other => other.into(),
        }
    }
}

/// Converts store layer errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ItemNotFound(_) | DbError::CartNotFound(_) => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            DbError::DuplicateItem(_) => ApiError::new(ErrorCode::Duplicate, err.to_string()),
            DbError::Core(e) => e.into(),
            DbError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::TypeMismatch { .. } => {
                // Log the actual error but return a generic message
                tracing::error!("Store type mismatch: {}", err);
                ApiError::internal("Store operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ReservationUnavailable { .. } => ErrorCode::InsufficientStock,
            CoreError::InvalidRelease { .. } | CoreError::InvalidRemoval { .. } => {
                ErrorCode::BusinessLogic
            }
            CoreError::CartNotAvailable { .. }
            | CoreError::InvalidQuantity { .. }
            | CoreError::ItemNotInCart(_) => ErrorCode::CartError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        match err {
            CoreError::Validation(e) => e.into(),
            other => ApiError::new(code, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Malformed or mistyped request bodies answer 422 with the usual body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(format!("invalid JSON payload: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = ?self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
