//! Entity CRUD handlers shared by every kind. The kind arrives as a route extension.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::Kind;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let rows = CrudService::list(state.storage.as_ref(), spec, None).await?;
    response::many(&rows)
}

/// GET /{parent}/{id}/{children}
pub async fn list_nested(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    Path(parent_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let rows = CrudService::list(state.storage.as_ref(), spec, Some(&parent_id)).await?;
    response::many(&rows)
}

pub async fn read(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let entity = CrudService::read(state.storage.as_ref(), spec, &id).await?;
    response::one(StatusCode::OK, &entity)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let entity = CrudService::create(state.storage.as_ref(), spec, None, body.into_inner()).await?;
    response::one(StatusCode::CREATED, &entity)
}

/// POST /{parent}/{id}/{children}
pub async fn create_nested(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    Path(parent_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let entity = CrudService::create(state.storage.as_ref(), spec, Some(&parent_id), body.into_inner()).await?;
    response::one(StatusCode::CREATED, &entity)
}

pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    let entity = CrudService::update(state.storage.as_ref(), spec, &id, body.into_inner()).await?;
    response::one(StatusCode::OK, &entity)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<Kind>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.kinds.spec(kind)?;
    CrudService::delete(state.storage.as_ref(), &state.kinds, spec, &id).await?;
    Ok(response::empty())
}
