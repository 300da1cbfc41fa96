//! HBnB API: REST resources for states, cities, amenities, users, places and reviews over a
//! pluggable object store.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_app, API_PREFIX};
pub use config::{KindRegistry, KindSpec, Settings, StorageBackend};
pub use error::{AppError, ConfigError};
pub use models::{Entity, Kind};
pub use response::error_body;
pub use state::AppState;
pub use store::{ensure_database_exists, FileStore, MemoryStore, PgStore, Storage, StoreError};
pub use service::{CrudService, PlaceAmenities, PlaceSearch};
