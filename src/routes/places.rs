//! Place amenity links and search.

use crate::handlers::places::{link_amenity, list_amenities, search, unlink_amenity};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/places_search", post(search))
        .route("/places/:id/amenities", get(list_amenities))
        .route("/places/:id/amenities/:amenity_id", post(link_amenity).delete(unlink_amenity))
}
