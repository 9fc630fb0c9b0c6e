//! JSON API under `/api/v1/location`.

use crate::app::view_models::LocationMarker;
use crate::app::LocationRequest;
use crate::domain::LocationStatus;
use crate::error::CenterError;
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: Option<i64>,
}

pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationMarker>>, ApiError> {
    Ok(Json(state.views.markers().await?))
}

pub async fn get_location(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.locations.find_by_id(id).await {
        Ok(Some(location)) => Json(location).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

pub async fn search_locations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<LocationMarker>>, ApiError> {
    let keyword = params.q.unwrap_or_default();
    if keyword.trim().is_empty() {
        return Err(CenterError::invalid("Search keyword is required").into());
    }
    let results = state.search.search(&keyword).await?;
    Ok(Json(results.iter().map(LocationMarker::from).collect()))
}

pub async fn create_location(
    State(state): State<AppState>,
    Form(request): Form<LocationRequest>,
) -> Result<Response, ApiError> {
    info!(
        name = %request.location_name,
        address = %request.location_address,
        "Create location request"
    );
    let location = state.locations.create(&request).await?;
    Ok(Json(location).into_response())
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(request): Form<LocationRequest>,
) -> Result<Response, ApiError> {
    let location = state.locations.update(id, &request).await?;
    Ok(Json(location).into_response())
}

/// Defaults to deactivating when no `status` is given.
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatusParams>,
) -> Result<Response, ApiError> {
    let status = LocationStatus::from_code(params.status.unwrap_or(0))?;
    state.locations.change_status(id, status).await?;
    Ok(Json(serde_json::json!({
        "id": id,
        "status": status.code(),
        "message": "Location status changed"
    }))
    .into_response())
}
