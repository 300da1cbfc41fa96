//! Place extras: amenity links and search.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response;
use crate::service::{search_dict, LinkOutcome, PlaceAmenities, PlaceSearch, SearchFilter};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list_amenities(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let amenities = PlaceAmenities::list(state.storage.as_ref(), &place_id).await?;
    response::many(&amenities)
}

/// 201 for a new link, 200 when the amenity was already linked.
pub async fn link_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (amenity, outcome) = PlaceAmenities::link(state.storage.as_ref(), &place_id, &amenity_id).await?;
    let status = match outcome {
        LinkOutcome::Created => StatusCode::CREATED,
        LinkOutcome::Existing => StatusCode::OK,
    };
    response::one(status, &amenity)
}

pub async fn unlink_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    PlaceAmenities::unlink(state.storage.as_ref(), &place_id, &amenity_id).await?;
    Ok(response::empty())
}

pub async fn search(State(state): State<AppState>, body: JsonBody) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::from_body(&body.into_object()?)?;
    let places = PlaceSearch::run(state.storage.as_ref(), &filter).await?;
    let dicts = if filter.is_empty() {
        places.iter().map(|p| p.to_dict().map_err(AppError::from)).collect::<Result<Vec<_>, _>>()?
    } else {
        places.iter().map(search_dict).collect::<Result<Vec<_>, _>>()?
    };
    Ok(Json(Value::Array(dicts)))
}
