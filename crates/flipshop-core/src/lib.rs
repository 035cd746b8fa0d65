//! # flipshop-core: Pure Business Logic for Flipshop
//!
//! Inventory reservation, the cart ledger and the promotion engine, as
//! plain data and functions with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Flipshop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    shop-api (axum)                              │    │
//! │  │    /cart ──► /cart/{id}/purchase ──► /cart/{id}/status/...      │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ flipshop-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   item    │  │   money   │  │   cart    │  │ promotion │    │    │
//! │  │   │ reserve   │  │ saturating│  │  ledger   │  │  rules +  │    │    │
//! │  │   │ release   │  │   math    │  │  submit   │  │ delegate  │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO STORE • NO LOGGING                                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    flipshop-db (Store Layer)                    │    │
//! │  │         MemoryKvStore transactions, repositories, seed          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Saturating arithmetic and the `Money` type
//! - [`item`] - Inventory items and their reservation counters
//! - [`cart`] - Cart ledger and lifecycle
//! - [`promotion`] - Promotion rules and the delegate they act through
//! - [`catalog`] - Launch SKUs and prices
//! - [`validation`] - Request input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use flipshop_core::{Cart, Item, Money};
//!
//! let mut speaker = Item::new("A304SD", "Alexa Speaker", Money::from_cents(10950), 10);
//! let mut cart = Cart::new();
//!
//! speaker.reserve(3).unwrap();
//! cart.purchase(&speaker, 3).unwrap();
//! cart.submit().unwrap();
//!
//! assert_eq!(cart.total.cents(), 32850);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod item;
pub mod money;
pub mod promotion;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartStatus, Purchase};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{Item, Sku};
pub use money::Money;
pub use promotion::{Promotion, PromotionDelegate, PromotionSet, PurchasedItem};
