use super::base::BaseModel;
use super::fields;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    pub fn from_fields(base: BaseModel, fields: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(User {
            base,
            email: fields::required_string(fields, "email")?,
            password: fields::required_string(fields, "password")?,
            first_name: fields::optional_string(fields, "first_name")?,
            last_name: fields::optional_string(fields, "last_name")?,
        })
    }

    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match key {
            "email" => self.email = fields::string(key, value)?,
            "password" => self.password = fields::string(key, value)?,
            "first_name" => self.first_name = fields::nullable_string(key, value)?,
            "last_name" => self.last_name = fields::nullable_string(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
