//! Public intake routes: booking and contact submissions

use crate::{
    error::Result,
    extractors::ApiJson,
    models::{BookingRequest, ContactRequest, OkResponse},
    AppState,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/book", post(handle_submit_booking))
        .route("/api/contact", post(handle_submit_contact))
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn handle_submit_booking(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookingRequest>,
) -> Result<impl IntoResponse> {
    let booking = state.intake.submit_booking(payload).await?;
    Ok(Json(OkResponse::with_id(booking.id)))
}

async fn handle_submit_contact(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse> {
    state.intake.submit_contact(payload).await?;
    Ok(Json(OkResponse::ok()))
}
