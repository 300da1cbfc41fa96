//! HTTP handlers for entity CRUD and the place extras.

pub mod entity;
pub mod places;
