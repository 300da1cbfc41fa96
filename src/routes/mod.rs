//! Route tables mounted under `/api/v1`.

pub mod common;
pub mod entity;
pub mod places;

pub use common::common_routes;
pub use entity::entity_routes;
pub use places::place_routes;
