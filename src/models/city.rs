use super::base::BaseModel;
use super::fields;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub state_id: String,
}

impl City {
    pub fn from_fields(base: BaseModel, fields: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(City {
            base,
            name: fields::required_string(fields, "name")?,
            state_id: fields::required_string(fields, "state_id")?,
        })
    }

    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match key {
            "name" => self.name = fields::string(key, value)?,
            "state_id" => self.state_id = fields::string(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
