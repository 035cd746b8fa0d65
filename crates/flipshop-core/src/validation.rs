//! # Validation Module
//!
//! Input checks run by the HTTP layer before any store transaction opens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request decoding (serde)                                      │
//! │  └── Shape and types of the JSON body                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Signs, lengths, identifier formats                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Item / Cart methods                                           │
//! │  └── Stock and lifecycle invariants (CoreError)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use flipshop_core::validation::{validate_purchase_qty, validate_sku};
//!
//! validate_sku("A304SD").unwrap();
//! validate_purchase_qty(3).unwrap();
//! assert!(validate_purchase_qty(0).is_err());
//! ```

use uuid::Uuid;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Longest accepted item name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU: non-empty, at most 50 characters, letters, digits,
/// hyphens and underscores only.
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Quantity added to or taken out of a cart. Must be > 0.
///
/// ## User Workflow
/// ```text
/// PUT /cart/{id}/purchase { sku, qty }
///      │
///      ▼
/// validate_purchase_qty(qty) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → 422 "qty must be positive"
///      │
///      └── OK → reserve + purchase in one transaction
/// ```
pub fn validate_purchase_qty(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    Ok(())
}

/// Quantity added by a restock or stocked on item creation. Zero is allowed.
pub fn validate_stock_qty(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a cart id. Returns the canonical hyphenated lowercase form, so
/// `"550E8400-..."` and `"550e8400-..."` address the same cart.
pub fn validate_cart_id(id: &str) -> ValidationResult<String> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cart_id".to_string(),
        });
    }

    let parsed = Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "cart_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(parsed.hyphenated().to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("A304SD").is_ok());
        assert!(validate_sku("234234").is_ok());
        assert!(validate_sku("usb_c-cable").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Raspberry Pi B").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_quantities() {
        assert!(validate_purchase_qty(1).is_ok());
        assert!(matches!(
            validate_purchase_qty(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_purchase_qty(-3).is_err());

        assert!(validate_stock_qty(0).is_ok());
        assert!(validate_stock_qty(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(539999).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_cart_id() {
        let id = validate_cart_id("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id, "550e8400-e29b-41d4-a716-446655440000");

        assert!(matches!(
            validate_cart_id("not-a-uuid"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_cart_id(""),
            Err(ValidationError::Required { .. })
        ));
    }
}
