//! # Routes
//!
//! ```text
//! ┌────────┬──────────────────────────────────┬─────────────────────────────┐
//! │ Method │ Path                             │ Handler                     │
//! ├────────┼──────────────────────────────────┼─────────────────────────────┤
//! │ GET    │ /health                          │ health::health              │
//! │ POST   │ /cart                            │ cart::create_cart           │
//! │ GET    │ /cart/{cart_id}                  │ cart::get_cart              │
//! │ PUT    │ /cart/{cart_id}/purchase         │ cart::add_purchase          │
//! │ DELETE │ /cart/{cart_id}/purchase         │ cart::remove_purchase       │
//! │ PUT    │ /cart/{cart_id}/status/submitted │ cart::submit                │
//! │ GET    │ /items                           │ items::list_items           │
//! │ POST   │ /items                           │ items::create_item          │
//! │ GET    │ /items/{sku}                     │ items::get_item             │
//! │ PUT    │ /items/{sku}                     │ items::restock_item         │
//! │ PUT    │ /items/{sku}/price               │ items::adjust_price         │
//! └────────┴──────────────────────────────────┴─────────────────────────────┘
//! ```
//!
//! ## Request Ids
//! ```text
//! request ──► SetRequestId ──► PropagateRequestId ──► log_request ──► handler
//!               │ keeps a client x-request-id,          │ logs start and end
//!               │ otherwise assigns a UUID v4           │ with request_id
//!               ▼                                       ▼
//! response ◄── x-request-id copied onto every response
//! ```

pub mod cart;
pub mod health;
pub mod items;

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::info;
use uuid::Uuid;

use crate::SharedState;

/// All routes, waiting for their state.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/cart", post(cart::create_cart))
        .route("/cart/{cart_id}", get(cart::get_cart))
        .route(
            "/cart/{cart_id}/purchase",
            put(cart::add_purchase).delete(cart::remove_purchase),
        )
        .route("/cart/{cart_id}/status/submitted", put(cart::submit))
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{sku}",
            get(items::get_item).put(items::restock_item),
        )
        .route("/items/{sku}/price", put(items::adjust_price))
        // Layers run bottom-up: the id is set before anything logs it.
        .layer(middleware::from_fn(log_request))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            UuidRequestId,
        ))
}

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assigns a UUID v4 to requests that arrive without an id.
#[derive(Debug, Clone, Copy)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Logs the start and the outcome of each request.
async fn log_request(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    info!(%request_id, %method, %path, "Request started");

    let response = next.run(request).await;

    info!(
        %request_id,
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}
