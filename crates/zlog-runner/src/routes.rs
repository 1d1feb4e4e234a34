//! Demo payment API served by the runner.
//!
//! Handlers write business events to the module logger; request/response
//! lines come from the middleware wrapped around the whole router.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::warn;
use zlog_core::{Fields, Logger};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<Logger>,
}

/// Routes without the logging middleware; see [`zlog_http::attach`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/payments", post(create_payment))
        .route("/payments/:payment_id", get(get_payment))
        .route("/payments/:payment_id/refund", post(refund_payment))
        .with_state(state)
}

/// Handlers keep serving when the log file is unwritable.
fn report(result: zlog_core::Result<()>) {
    if let Err(e) = result {
        warn!("payment log write failed: {e}");
    }
}

fn is_payment_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix("pay_") else {
        return false;
    };
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Payment Service API 💸" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn create_payment(State(state): State<AppState>) -> Json<Value> {
    let payment_id = format!("pay_{}", uuid::Uuid::new_v4().simple());
    let fields = Fields::new()
        .with("payment_id", payment_id.as_str())
        .with("amount", 1000);
    report(state.logger.info("Payment created", None, fields));
    Json(json!({ "payment_id": payment_id, "status": "succeeded", "amount": 1000 }))
}

async fn get_payment(Path(payment_id): Path<String>) -> Json<Value> {
    Json(json!({
        "payment_id": payment_id,
        "status": "succeeded",
        "amount": 1000,
        "created_at": "2024-03-20T10:00:00Z",
    }))
}

async fn refund_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    if !is_payment_id(&payment_id) {
        let message = format!("Refund failed: unknown payment id {payment_id:?}");
        let fields = Fields::new().with("payment_id", payment_id.as_str());
        report(state.logger.error(&message, None, fields));
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Refund failed" })),
        );
    }

    let refund_id = format!("ref_{}", uuid::Uuid::new_v4().simple());
    let fields = Fields::new()
        .with("payment_id", payment_id.as_str())
        .with("refund_id", refund_id.as_str());
    report(state.logger.info("Payment refunded", None, fields));
    (
        StatusCode::OK,
        Json(json!({
            "refund_id": refund_id,
            "payment_id": payment_id,
            "status": "succeeded",
            "amount": 1000,
        })),
    )
}
