//! Entity kinds and the tagged union stored by every backend.

use super::{Amenity, BaseModel, City, Place, Review, State, User};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::State,
        Kind::City,
        Kind::Amenity,
        Kind::User,
        Kind::Place,
        Kind::Review,
    ];

    /// Class name used in `__class__` and in file storage keys.
    pub fn class_name(self) -> &'static str {
        match self {
            Kind::Amenity => "Amenity",
            Kind::City => "City",
            Kind::Place => "Place",
            Kind::Review => "Review",
            Kind::State => "State",
            Kind::User => "User",
        }
    }

    pub fn from_class_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.class_name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Entity {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Entity {
    /// Build a new entity of `kind` from an already validated field map.
    /// Identity and timestamps are always generated here, never taken from `fields`.
    pub fn build(kind: Kind, fields: &Map<String, Value>) -> Result<Self, AppError> {
        let base = BaseModel::new();
        Ok(match kind {
            Kind::Amenity => Entity::Amenity(Amenity::from_fields(base, fields)?),
            Kind::City => Entity::City(City::from_fields(base, fields)?),
            Kind::Place => Entity::Place(Place::from_fields(base, fields)?),
            Kind::Review => Entity::Review(Review::from_fields(base, fields)?),
            Kind::State => Entity::State(State::from_fields(base, fields)?),
            Kind::User => Entity::User(User::from_fields(base, fields)?),
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Entity::Amenity(_) => Kind::Amenity,
            Entity::City(_) => Kind::City,
            Entity::Place(_) => Kind::Place,
            Entity::Review(_) => Kind::Review,
            Entity::State(_) => Kind::State,
            Entity::User(_) => Kind::User,
        }
    }

    pub fn base(&self) -> &BaseModel {
        match self {
            Entity::Amenity(e) => &e.base,
            Entity::City(e) => &e.base,
            Entity::Place(e) => &e.base,
            Entity::Review(e) => &e.base,
            Entity::State(e) => &e.base,
            Entity::User(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        match self {
            Entity::Amenity(e) => &mut e.base,
            Entity::City(e) => &mut e.base,
            Entity::Place(e) => &mut e.base,
            Entity::Review(e) => &mut e.base,
            Entity::State(e) => &mut e.base,
            Entity::User(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn touch(&mut self) {
        self.base_mut().touch();
    }

    /// Overwrite one typed field. Ok(false) when the kind has no such field.
    pub fn set_field(&mut self, key: &str, value: &Value) -> Result<bool, AppError> {
        match self {
            Entity::Amenity(e) => e.set_field(key, value),
            Entity::City(e) => e.set_field(key, value),
            Entity::Place(e) => e.set_field(key, value),
            Entity::Review(e) => e.set_field(key, value),
            Entity::State(e) => e.set_field(key, value),
            Entity::User(e) => e.set_field(key, value),
        }
    }

    /// Value of a foreign key column such as `state_id` or `user_id`.
    pub fn foreign_key(&self, field: &str) -> Option<&str> {
        match (self, field) {
            (Entity::City(c), "state_id") => Some(&c.state_id),
            (Entity::Place(p), "city_id") => Some(&p.city_id),
            (Entity::Place(p), "user_id") => Some(&p.user_id),
            (Entity::Review(r), "place_id") => Some(&r.place_id),
            (Entity::Review(r), "user_id") => Some(&r.user_id),
            _ => None,
        }
    }

    /// JSON dictionary of every attribute, `__class__` included.
    pub fn to_dict(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Entity::Place(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_place(self) -> Option<Place> {
        match self {
            Entity::Place(p) => Some(p),
            _ => None,
        }
    }
}
