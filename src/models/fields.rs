//! Typed reads of request body fields. Every failure names the offending field.

use crate::error::AppError;
use serde_json::{Map, Value};

pub(crate) fn required_string(fields: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(AppError::MissingField(key.to_string())),
        Some(v) => string(key, v),
    }
}

pub(crate) fn optional_string(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, AppError> {
    fields.get(key).map_or(Ok(None), |v| nullable_string(key, v))
}

pub(crate) fn integer_or_zero(fields: &Map<String, Value>, key: &str) -> Result<i64, AppError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => integer(key, v),
    }
}

pub(crate) fn optional_float(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>, AppError> {
    fields.get(key).map_or(Ok(None), |v| nullable_float(key, v))
}

pub(crate) fn string(key: &str, value: &Value) -> Result<String, AppError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidField(key.to_string()))
}

pub(crate) fn nullable_string(key: &str, value: &Value) -> Result<Option<String>, AppError> {
    match value {
        Value::Null => Ok(None),
        v => string(key, v).map(Some),
    }
}

pub(crate) fn integer(key: &str, value: &Value) -> Result<i64, AppError> {
    value.as_i64().ok_or_else(|| AppError::InvalidField(key.to_string()))
}

pub(crate) fn nullable_float(key: &str, value: &Value) -> Result<Option<f64>, AppError> {
    match value {
        Value::Null => Ok(None),
        v => v.as_f64().map(Some).ok_or_else(|| AppError::InvalidField(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn null_required_string_is_missing() {
        let f = map(json!({ "name": null }));
        assert!(matches!(required_string(&f, "name"), Err(AppError::MissingField(k)) if k == "name"));
    }

    #[test]
    fn wrong_type_is_invalid() {
        let f = map(json!({ "name": 3, "number_rooms": "3", "latitude": "north" }));
        assert!(matches!(required_string(&f, "name"), Err(AppError::InvalidField(_))));
        assert!(matches!(integer_or_zero(&f, "number_rooms"), Err(AppError::InvalidField(_))));
        assert!(matches!(optional_float(&f, "latitude"), Err(AppError::InvalidField(_))));
    }

    #[test]
    fn absent_optionals_default() {
        let f = Map::new();
        assert_eq!(integer_or_zero(&f, "max_guest").unwrap(), 0);
        assert_eq!(optional_float(&f, "longitude").unwrap(), None);
        assert_eq!(optional_string(&f, "first_name").unwrap(), None);
    }

    #[test]
    fn integers_accepted_as_floats() {
        let f = map(json!({ "latitude": 37 }));
        assert_eq!(optional_float(&f, "latitude").unwrap(), Some(37.0));
    }
}
