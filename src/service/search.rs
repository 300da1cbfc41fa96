//! Place search by states, cities and required amenities.

use crate::error::AppError;
use crate::models::{Entity, Kind};
use crate::store::Storage;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Parsed search body. Absent or null filters are empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilter {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub amenities: Vec<String>,
}

impl SearchFilter {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(SearchFilter {
            states: id_list(body, "states")?,
            cities: id_list(body, "cities")?,
            amenities: id_list(body, "amenities")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.amenities.is_empty()
    }
}

fn id_list(body: &Map<String, Value>, key: &str) -> Result<Vec<String>, AppError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::InvalidField(key.to_string()))
            })
            .collect(),
        Some(_) => Err(AppError::InvalidField(key.to_string())),
    }
}

pub struct PlaceSearch;

impl PlaceSearch {
    /// Places matching `filter`, in first-seen order.
    pub async fn run(storage: &dyn Storage, filter: &SearchFilter) -> Result<Vec<Entity>, AppError> {
        let places = storage.all(Kind::Place).await?;
        if filter.is_empty() {
            return Ok(places);
        }

        let mut city_ids: Vec<String> = Vec::new();
        if !filter.states.is_empty() {
            let cities = storage.all(Kind::City).await?;
            for state_id in &filter.states {
                city_ids.extend(
                    cities
                        .iter()
                        .filter(|c| c.foreign_key("state_id") == Some(state_id.as_str()))
                        .map(|c| c.id().to_string()),
                );
            }
        }
        city_ids.extend(filter.cities.iter().cloned());

        let mut candidates: Vec<Entity> = if filter.states.is_empty() && filter.cities.is_empty() {
            places
        } else {
            let mut seen = HashSet::new();
            let mut out = Vec::new();
            for city_id in &city_ids {
                for place in &places {
                    if place.foreign_key("city_id") == Some(city_id.as_str()) && seen.insert(place.id().to_string()) {
                        out.push(place.clone());
                    }
                }
            }
            out
        };

        if !filter.amenities.is_empty() {
            for id in &filter.amenities {
                if storage.get(Kind::Amenity, id).await?.is_none() {
                    tracing::debug!(amenity = %id, "unknown amenity in search");
                    return Ok(Vec::new());
                }
            }
            candidates.retain(|e| {
                e.as_place()
                    .is_some_and(|p| filter.amenities.iter().all(|a| p.has_amenity(a)))
            });
        }

        tracing::debug!(matched = candidates.len(), "place search");
        Ok(candidates)
    }
}

/// Place dict for search results: every field except `amenities`.
pub fn search_dict(place: &Entity) -> Result<Value, AppError> {
    let mut dict = place.to_dict()?;
    if let Value::Object(map) = &mut dict {
        map.remove("amenities");
    }
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    async fn seed(store: &MemoryStore, kind: Kind, v: Value) -> Entity {
        let e = Entity::build(kind, v.as_object().unwrap()).unwrap();
        store.save(&e).await.unwrap();
        e
    }

    async fn place(store: &MemoryStore, city: &Entity, name: &str, amenities: &[&Entity]) -> Entity {
        let mut p = seed(store, Kind::Place, json!({"city_id": city.id(), "user_id": "u", "name": name})).await;
        if let Entity::Place(inner) = &mut p {
            for a in amenities {
                inner.link_amenity(a.id());
            }
        }
        store.save(&p).await.unwrap();
        p
    }

    fn ids(found: &[Entity]) -> Vec<&str> {
        found.iter().map(Entity::id).collect()
    }

    struct World {
        store: MemoryStore,
        ca: Entity,
        nv: Entity,
        sf: Entity,
        la: Entity,
        wifi: Entity,
        pool: Entity,
        loft: Entity,
        villa: Entity,
        cabin: Entity,
    }

    async fn world() -> World {
        let store = MemoryStore::new();
        let ca = seed(&store, Kind::State, json!({"name": "CA"})).await;
        let nv = seed(&store, Kind::State, json!({"name": "NV"})).await;
        let sf = seed(&store, Kind::City, json!({"name": "SF", "state_id": ca.id()})).await;
        let la = seed(&store, Kind::City, json!({"name": "LA", "state_id": ca.id()})).await;
        let reno = seed(&store, Kind::City, json!({"name": "Reno", "state_id": nv.id()})).await;
        let wifi = seed(&store, Kind::Amenity, json!({"name": "Wifi"})).await;
        let pool = seed(&store, Kind::Amenity, json!({"name": "Pool"})).await;
        let loft = place(&store, &sf, "Loft", &[&wifi]).await;
        let villa = place(&store, &la, "Villa", &[&wifi, &pool]).await;
        let cabin = place(&store, &reno, "Cabin", &[]).await;
        World {
            store,
            ca,
            nv,
            sf,
            la,
            wifi,
            pool,
            loft,
            villa,
            cabin,
        }
    }

    #[test]
    fn non_array_filter_is_invalid() {
        let body = json!({"states": "CA"});
        let err = SearchFilter::from_body(body.as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid states");
        let body = json!({"amenities": [1]});
        assert!(SearchFilter::from_body(body.as_object().unwrap()).is_err());
    }

    #[tokio::test]
    async fn empty_filter_returns_everything() {
        let w = world().await;
        let found = PlaceSearch::run(&w.store, &SearchFilter::default()).await.unwrap();
        assert_eq!(ids(&found), vec![w.loft.id(), w.villa.id(), w.cabin.id()]);
    }

    #[tokio::test]
    async fn state_and_city_union_has_no_duplicates() {
        let w = world().await;
        let filter = SearchFilter {
            states: vec![w.ca.id().to_string()],
            cities: vec![w.sf.id().to_string(), "nope".into()],
            ..Default::default()
        };
        let found = PlaceSearch::run(&w.store, &filter).await.unwrap();
        assert_eq!(ids(&found), vec![w.loft.id(), w.villa.id()]);
    }

    #[tokio::test]
    async fn states_expand_in_requested_order() {
        let w = world().await;
        let filter = SearchFilter {
            states: vec![w.nv.id().to_string(), w.ca.id().to_string()],
            ..Default::default()
        };
        let found = PlaceSearch::run(&w.store, &filter).await.unwrap();
        assert_eq!(ids(&found), vec![w.cabin.id(), w.loft.id(), w.villa.id()]);
    }

    #[tokio::test]
    async fn amenities_alone_filter_all_places() {
        let w = world().await;
        let filter = SearchFilter {
            amenities: vec![w.wifi.id().to_string()],
            ..Default::default()
        };
        let found = PlaceSearch::run(&w.store, &filter).await.unwrap();
        assert_eq!(ids(&found), vec![w.loft.id(), w.villa.id()]);

        let filter = SearchFilter {
            amenities: vec![w.wifi.id().to_string(), w.pool.id().to_string()],
            ..Default::default()
        };
        let found = PlaceSearch::run(&w.store, &filter).await.unwrap();
        assert_eq!(ids(&found), vec![w.villa.id()]);
    }

    #[tokio::test]
    async fn amenities_narrow_city_candidates() {
        let w = world().await;
        let filter = SearchFilter {
            cities: vec![w.la.id().to_string()],
            amenities: vec![w.pool.id().to_string()],
            ..Default::default()
        };
        let found = PlaceSearch::run(&w.store, &filter).await.unwrap();
        assert_eq!(ids(&found), vec![w.villa.id()]);
    }

    #[tokio::test]
    async fn empty_candidates_stay_empty_with_amenities() {
        let w = world().await;
        let filter = SearchFilter {
            cities: vec!["nope".into()],
            amenities: vec![w.wifi.id().to_string()],
            ..Default::default()
        };
        assert!(PlaceSearch::run(&w.store, &filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_amenity_matches_nothing() {
        let w = world().await;
        let filter = SearchFilter {
            amenities: vec!["nope".into()],
            ..Default::default()
        };
        assert!(PlaceSearch::run(&w.store, &filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_dict_drops_amenities() {
        let w = world().await;
        let dict = search_dict(&w.villa).unwrap();
        assert!(dict.get("amenities").is_none());
        assert_eq!(dict["name"], "Villa");
        assert_eq!(dict["__class__"], "Place");
    }
}
