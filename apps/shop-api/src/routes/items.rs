//! # Item Routes
//!
//! Inventory administration. Items are never deleted.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use flipshop_core::validation::{
    validate_item_name, validate_price_cents, validate_sku, validate_stock_qty,
};
use flipshop_core::{Item, Money};
use flipshop_db::DbResult;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::SharedState;

/// Body of `POST /items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewItemPayload {
    pub sku: String,
    pub name: String,
    /// Unit price in cents.
    pub price: i64,
    pub qty: i64,
}

/// Body of `PUT /items/{sku}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestockPayload {
    pub qty: i64,
}

/// Body of `PUT /items/{sku}/price`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricePayload {
    pub price: i64,
}

/// All items, sorted by SKU.
pub async fn list_items(State(state): State<SharedState>) -> Json<Vec<Item>> {
    Json(state.db.items().list())
}

pub async fn get_item(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
) -> ApiResult<Json<Item>> {
    let item = state.db.items().find_by_sku_committed(&sku)?;
    Ok(Json(item))
}

/// Adds a new item. An existing SKU is refused with 422.
pub async fn create_item(
    State(state): State<SharedState>,
    payload: Result<Json<NewItemPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(payload) = payload?;
    validate_sku(&payload.sku)?;
    validate_item_name(&payload.name)?;
    validate_price_cents(payload.price)?;
    validate_stock_qty(payload.qty)?;

    let item = Item::new(
        payload.sku.trim(),
        payload.name.trim(),
        Money::from_cents(payload.price),
        payload.qty,
    );

    let items = state.db.items();
    items.with_transaction(|tx| items.insert(tx, &item))?;

    info!(sku = %item.sku, price = %item.price, qty = item.qty_available, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Adds stock to an existing item.
pub async fn restock_item(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
    payload: Result<Json<RestockPayload>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(payload) = payload?;
    validate_stock_qty(payload.qty)?;

    let items = state.db.items();
    let item = items.with_transaction(|tx| -> DbResult<Item> {
        let mut item = items.find_by_sku(tx, &sku)?;
        item.restock(payload.qty);
        items.store(tx, &item)?;
        Ok(item)
    })?;

    info!(sku = %item.sku, added = payload.qty, qty = item.qty_available, "Item restocked");
    Ok(Json(item))
}

/// Sets a new unit price. Open carts keep the price they snapshotted.
pub async fn adjust_price(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
    payload: Result<Json<PricePayload>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(payload) = payload?;
    validate_price_cents(payload.price)?;

    let items = state.db.items();
    let item = items.with_transaction(|tx| -> DbResult<Item> {
        let mut item = items.find_by_sku(tx, &sku)?;
        item.adjust_price(Money::from_cents(payload.price));
        items.store(tx, &item)?;
        Ok(item)
    })?;

    info!(sku = %item.sku, price = %item.price, "Item price adjusted");
    Ok(Json(item))
}
