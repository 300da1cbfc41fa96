//! Request body checks run before an entity is built.

use crate::config::KindSpec;
use crate::error::AppError;
use crate::store::Storage;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Required keys are checked in declared order; the first absent or null one is reported.
    pub fn require(body: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
        for key in required {
            match body.get(*key) {
                None | Some(Value::Null) => return Err(AppError::MissingField((*key).to_string())),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Every reference field present in the body must name an existing entity.
    pub async fn references_exist(
        storage: &dyn Storage,
        spec: &KindSpec,
        body: &Map<String, Value>,
    ) -> Result<(), AppError> {
        for fk in spec.references {
            let Some(value) = body.get(fk.field) else {
                continue;
            };
            let id = value
                .as_str()
                .ok_or_else(|| AppError::InvalidField(fk.field.to_string()))?;
            if storage.get(fk.kind, id).await?.is_none() {
                return Err(AppError::not_found(format!("{} {}", fk.kind, id)));
            }
        }
        Ok(())
    }
}
