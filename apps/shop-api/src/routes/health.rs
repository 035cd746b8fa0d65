//! Health endpoint.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::SharedState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Time since startup, e.g. `"1m 12.5s"`.
    pub uptime: String,
    pub version: String,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: format_uptime(state.uptime()),
        version: state.version.clone(),
    })
}

/// Spaced units with tenths of a second (`1h 1m 1.0s`), deliberately not
/// the compact `1h1m1s` form.
/// Clients only display this value.
fn format_uptime(uptime: Duration) -> String {
    let total_ms = uptime.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms % 60_000) as f64 / 1000.0;

    match (hours, minutes) {
        (0, 0) => format!("{:.1}s", seconds),
        (0, m) => format!("{}m {:.1}s", m, seconds),
        (h, m) => format!("{}h {}m {:.1}s", h, m, seconds),
    }
}
