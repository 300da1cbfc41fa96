//! Entity records: one typed struct per kind plus the shared base attributes.

mod amenity;
mod base;
mod city;
mod entity;
pub(crate) mod fields;
mod place;
mod review;
mod state;
mod user;

pub use amenity::Amenity;
pub use base::{BaseModel, TIME_FORMAT};
pub use city::City;
pub use entity::{Entity, Kind};
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;
