use crate::error::CenterError;
use crate::server::templates::ErrorTemplate;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::error;

fn status_for(err: &CenterError) -> StatusCode {
    if err.is_argument_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// JSON error body for the `/api` routes: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub CenterError);

impl From<CenterError> for ApiError {
    fn from(err: CenterError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("API request failed: {}", self.0);
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Inline HTML error for page routes.
#[derive(Debug)]
pub struct PageError(pub CenterError);

impl From<CenterError> for PageError {
    fn from(err: CenterError) -> Self {
        PageError(err)
    }
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        PageError(CenterError::Template(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("Page request failed: {}", self.0);
        }
        let page = ErrorTemplate {
            message: self.0.to_string(),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, self.0.to_string()).into_response(),
        }
    }
}
