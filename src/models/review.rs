use super::base::BaseModel;
use super::fields;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseModel,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Review {
    pub fn from_fields(base: BaseModel, fields: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Review {
            base,
            place_id: fields::required_string(fields, "place_id")?,
            user_id: fields::required_string(fields, "user_id")?,
            text: fields::required_string(fields, "text")?,
        })
    }

    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match key {
            "place_id" => self.place_id = fields::string(key, value)?,
            "user_id" => self.user_id = fields::string(key, value)?,
            "text" => self.text = fields::string(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
