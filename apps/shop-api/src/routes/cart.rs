//! # Cart Routes
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /cart ──► Available ──► PUT .../status/submitted ──► Submitted    │
//! │                   │  ▲                                                  │
//! │                   │  │  PUT    .../purchase  reserve, then add          │
//! │                   │  │  DELETE .../purchase  release, then take out     │
//! │                   └──┘                                                  │
//! │                                                                         │
//! │  Each change loads, mutates and stores the item and the cart in one     │
//! │  transaction: either both change or neither does.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use flipshop_core::validation::{validate_cart_id, validate_purchase_qty, validate_sku};
use flipshop_core::{Cart, CoreResult, Item};
use flipshop_db::{Database, DbResult};
use serde::Deserialize;
use tracing::info;

use crate::checkout;
use crate::error::{ApiError, ApiResult};
use crate::SharedState;

/// Body of `PUT` and `DELETE /cart/{cart_id}/purchase`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PurchasePayload {
    pub sku: String,
    pub qty: i64,
}

impl PurchasePayload {
    fn validate(&self) -> ApiResult<()> {
        validate_sku(&self.sku)?;
        validate_purchase_qty(self.qty)?;
        Ok(())
    }
}

/// Creates an empty cart.
pub async fn create_cart(State(state): State<SharedState>) -> ApiResult<(StatusCode, Json<Cart>)> {
    let cart = state.db.carts().create()?;

    info!(cart_id = %cart.cart_id, "Cart created");
    Ok((StatusCode::CREATED, Json(cart)))
}

/// Returns the committed state of a cart.
pub async fn get_cart(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
) -> ApiResult<Json<Cart>> {
    let cart_id = validate_cart_id(&cart_id)?;
    let cart = state.db.carts().find_by_id(&cart_id)?;
    Ok(Json(cart))
}

/// Reserves stock and adds it to the cart.
///
/// ## Errors
/// ```text
/// cart id malformed          → 422
/// cart unknown               → 404
/// sku unknown                → 422
/// qty ≤ 0                    → 422
/// not enough unreserved      → 422 INSUFFICIENT_STOCK
/// cart already submitted     → 422 CART_ERROR
/// ```
pub async fn add_purchase(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
    payload: Result<Json<PurchasePayload>, JsonRejection>,
) -> ApiResult<Json<Cart>> {
    let cart_id = validate_cart_id(&cart_id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let qty = payload.qty;
    let cart = change_cart(&state.db, &cart_id, &payload.sku, |item, cart| {
        item.reserve(qty)?;
        cart.purchase(item, qty)
    })?;

    info!(cart_id = %cart_id, sku = %payload.sku, qty, "Item purchased");
    Ok(Json(cart))
}

/// Releases reserved stock and takes it out of the cart.
pub async fn remove_purchase(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
    payload: Result<Json<PurchasePayload>, JsonRejection>,
) -> ApiResult<Json<Cart>> {
    let cart_id = validate_cart_id(&cart_id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let qty = payload.qty;
    let cart = change_cart(&state.db, &cart_id, &payload.sku, |item, cart| {
        item.release(qty)?;
        cart.purchase(item, -qty)
    })?;

    info!(cart_id = %cart_id, sku = %payload.sku, qty, "Item removed");
    Ok(Json(cart))
}

/// Applies promotions and submits the cart.
pub async fn submit(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
) -> ApiResult<Json<Cart>> {
    let cart_id = validate_cart_id(&cart_id)?;
    let cart = checkout::submit_cart(&state.db, &state.promotions, &cart_id)
        .map_err(ApiError::from_cart_change)?;

    info!(cart_id = %cart_id, total = %cart.total, lines = cart.line_count(), "Cart submitted");
    Ok(Json(cart))
}

/// Loads a cart and an item, applies `change` to both and stores them.
fn change_cart<F>(db: &Database, cart_id: &str, sku: &str, change: F) -> ApiResult<Cart>
where
    F: FnOnce(&mut Item, &mut Cart) -> CoreResult<()>,
{
    let items = db.items();
    let carts = db.carts();

    db.with_transaction(|tx| -> DbResult<Cart> {
        let mut cart = carts.find_by_id_in(tx, cart_id)?;
        let mut item = items.find_by_sku(tx, sku)?;

        change(&mut item, &mut cart)?;

        carts.store(tx, &cart)?;
        items.store(tx, &item)?;
        Ok(cart)
    })
    .map_err(ApiError::from_cart_change)
}
