//! Router assembly: API routes under `/api/v1`, JSON 404 fallback, body limit, request tracing,
//! trailing-slash normalization.

use crate::response::error_body;
use crate::routes::{common_routes, entity_routes, place_routes};
use crate::state::AppState;
use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    middleware::map_response,
    response::Response,
    Json, Router,
};
use serde_json::Value;
use tower::Layer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

pub const API_PREFIX: &str = "/api/v1";

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(error_body("Not found")))
}

/// Rewrites error responses produced outside the handlers (405 from routing, 413 from the
/// body limit) into `{"error": <reason>}`. Responses that are already JSON pass through.
async fn json_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Error");
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, Body::from(error_body(message).to_string()))
}

/// Full application service. Path normalization wraps the router so it runs before routing.
pub fn build_app(state: AppState, body_limit: usize) -> NormalizePath<Router> {
    let api = Router::new()
        .merge(common_routes())
        .merge(entity_routes(&state.kinds))
        .merge(place_routes());
    let router = Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(map_response(json_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
