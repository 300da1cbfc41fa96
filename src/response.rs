//! Response helpers: entity dicts, lists of dicts, the empty object, error bodies.

use crate::error::AppError;
use crate::models::Entity;
use axum::{http::StatusCode, Json};
use serde_json::{json, Map, Value};

pub fn one(status: StatusCode, entity: &Entity) -> Result<(StatusCode, Json<Value>), AppError> {
    Ok((status, Json(entity.to_dict()?)))
}

pub fn many(entities: &[Entity]) -> Result<(StatusCode, Json<Value>), AppError> {
    let dicts = entities
        .iter()
        .map(Entity::to_dict)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((StatusCode::OK, Json(Value::Array(dicts))))
}

/// `200 {}` returned by deletes and unlinks.
pub fn empty() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(Value::Object(Map::new())))
}

pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}
