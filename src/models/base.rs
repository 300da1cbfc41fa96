//! Identity and timestamps shared by every entity kind.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire format for `created_at` / `updated_at` (microsecond precision, no offset).
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl BaseModel {
    /// Fresh identity: UUID v4 id, both timestamps set to now.
    pub fn new() -> Self {
        let now = now();
        BaseModel {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time truncated to what the wire format can carry.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub mod timestamp {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map_err(serde::de::Error::custom)
    }
}
