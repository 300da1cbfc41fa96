use super::base::BaseModel;
use super::fields;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Linked amenity ids in link order. Only the link routes change this list.
    #[serde(default, rename = "amenities")]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn from_fields(base: BaseModel, fields: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Place {
            base,
            city_id: fields::required_string(fields, "city_id")?,
            user_id: fields::required_string(fields, "user_id")?,
            name: fields::required_string(fields, "name")?,
            description: fields::optional_string(fields, "description")?,
            number_rooms: fields::integer_or_zero(fields, "number_rooms")?,
            number_bathrooms: fields::integer_or_zero(fields, "number_bathrooms")?,
            max_guest: fields::integer_or_zero(fields, "max_guest")?,
            price_by_night: fields::integer_or_zero(fields, "price_by_night")?,
            latitude: fields::optional_float(fields, "latitude")?,
            longitude: fields::optional_float(fields, "longitude")?,
            amenity_ids: Vec::new(),
        })
    }

    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match key {
            "city_id" => self.city_id = fields::string(key, value)?,
            "user_id" => self.user_id = fields::string(key, value)?,
            "name" => self.name = fields::string(key, value)?,
            "description" => self.description = fields::nullable_string(key, value)?,
            "number_rooms" => self.number_rooms = fields::integer(key, value)?,
            "number_bathrooms" => self.number_bathrooms = fields::integer(key, value)?,
            "max_guest" => self.max_guest = fields::integer(key, value)?,
            "price_by_night" => self.price_by_night = fields::integer(key, value)?,
            "latitude" => self.latitude = fields::nullable_float(key, value)?,
            "longitude" => self.longitude = fields::nullable_float(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Appends the link; false if it already existed.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        true
    }

    /// Removes the link; false if there was none.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }
}
