use super::base::BaseModel;
use super::fields;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
}

impl State {
    pub fn from_fields(base: BaseModel, fields: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(State {
            base,
            name: fields::required_string(fields, "name")?,
        })
    }

    /// Returns false when `key` is not a field of this kind.
    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match key {
            "name" => self.name = fields::string(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
