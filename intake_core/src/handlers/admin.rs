//! Password-gated booking administration

use crate::{
    error::Result,
    middleware::admin::require_admin_pass,
    models::OkResponse,
    AppState,
};
use axum::{
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

/// Every route here sits behind the admin gate, which rejects the request
/// before the handler runs.
pub fn create_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/bookings", get(handle_list_bookings))
        .route("/admin/bookings/:id", delete(handle_delete_booking))
        .route_layer(middleware::from_fn_with_state(state, require_admin_pass))
}

async fn handle_list_bookings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let bookings = state.intake.list_bookings().await?;
    Ok(Json(bookings))
}

async fn handle_delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.intake.delete_booking(&id).await?;
    Ok(Json(OkResponse::ok()))
}
