//! Place ↔ Amenity links, stored as the ordered `amenities` id list on each place.

use crate::error::AppError;
use crate::models::{Entity, Kind, Place};
use crate::store::Storage;

/// Whether a link call created a new link or found it in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    Existing,
}

pub struct PlaceAmenities;

impl PlaceAmenities {
    /// Linked amenities in link order. Ids whose amenity no longer exists are skipped.
    pub async fn list(storage: &dyn Storage, place_id: &str) -> Result<Vec<Entity>, AppError> {
        let place = load_place(storage, place_id).await?;
        let mut out = Vec::with_capacity(place.amenity_ids.len());
        for id in &place.amenity_ids {
            match storage.get(Kind::Amenity, id).await? {
                Some(amenity) => out.push(amenity),
                None => tracing::debug!(place = %place_id, amenity = %id, "skipping dangling link"),
            }
        }
        Ok(out)
    }

    pub async fn link(
        storage: &dyn Storage,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(Entity, LinkOutcome), AppError> {
        let mut place = load_place(storage, place_id).await?;
        let amenity = load_amenity(storage, amenity_id).await?;
        if !place.link_amenity(amenity_id) {
            return Ok((amenity, LinkOutcome::Existing));
        }
        place.base.touch();
        storage.save(&Entity::Place(place)).await?;
        tracing::info!(place = %place_id, amenity = %amenity_id, "linked");
        Ok((amenity, LinkOutcome::Created))
    }

    /// Remove a link. Not found when either side is missing or they are not linked.
    pub async fn unlink(storage: &dyn Storage, place_id: &str, amenity_id: &str) -> Result<(), AppError> {
        let mut place = load_place(storage, place_id).await?;
        load_amenity(storage, amenity_id).await?;
        if !place.unlink_amenity(amenity_id) {
            return Err(AppError::not_found(format!("link {} -> {}", place_id, amenity_id)));
        }
        place.base.touch();
        storage.save(&Entity::Place(place)).await?;
        tracing::info!(place = %place_id, amenity = %amenity_id, "unlinked");
        Ok(())
    }
}

async fn load_place(storage: &dyn Storage, id: &str) -> Result<Place, AppError> {
    storage
        .get(Kind::Place, id)
        .await?
        .and_then(Entity::into_place)
        .ok_or_else(|| AppError::not_found(format!("Place {}", id)))
}

async fn load_amenity(storage: &dyn Storage, id: &str) -> Result<Entity, AppError> {
    storage
        .get(Kind::Amenity, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Amenity {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    async fn seed(store: &MemoryStore, kind: Kind, v: Value) -> Entity {
        let e = Entity::build(kind, v.as_object().unwrap()).unwrap();
        store.save(&e).await.unwrap();
        e
    }

    async fn place_and_amenity(store: &MemoryStore) -> (Entity, Entity) {
        let place = seed(store, Kind::Place, json!({"city_id": "c", "user_id": "u", "name": "Loft"})).await;
        let wifi = seed(store, Kind::Amenity, json!({"name": "Wifi"})).await;
        (place, wifi)
    }

    #[tokio::test]
    async fn link_twice_reports_existing() {
        let store = MemoryStore::new();
        let (place, wifi) = place_and_amenity(&store).await;
        let (_, first) = PlaceAmenities::link(&store, place.id(), wifi.id()).await.unwrap();
        let (_, second) = PlaceAmenities::link(&store, place.id(), wifi.id()).await.unwrap();
        assert_eq!(first, LinkOutcome::Created);
        assert_eq!(second, LinkOutcome::Existing);
        let linked = PlaceAmenities::list(&store, place.id()).await.unwrap();
        assert_eq!(linked, vec![wifi]);
    }

    #[tokio::test]
    async fn unlink_requires_existing_link() {
        let store = MemoryStore::new();
        let (place, wifi) = place_and_amenity(&store).await;
        let err = PlaceAmenities::unlink(&store, place.id(), wifi.id()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        PlaceAmenities::link(&store, place.id(), wifi.id()).await.unwrap();
        PlaceAmenities::unlink(&store, place.id(), wifi.id()).await.unwrap();
        assert!(PlaceAmenities::list(&store, place.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_amenity_is_skipped_in_listing() {
        let store = MemoryStore::new();
        let (place, wifi) = place_and_amenity(&store).await;
        let pool = seed(&store, Kind::Amenity, json!({"name": "Pool"})).await;
        PlaceAmenities::link(&store, place.id(), wifi.id()).await.unwrap();
        PlaceAmenities::link(&store, place.id(), pool.id()).await.unwrap();
        store.delete(&wifi).await.unwrap();
        let linked = PlaceAmenities::list(&store, place.id()).await.unwrap();
        assert_eq!(linked, vec![pool]);
    }

    #[tokio::test]
    async fn unknown_place_or_amenity_is_not_found() {
        let store = MemoryStore::new();
        let (place, wifi) = place_and_amenity(&store).await;
        assert!(PlaceAmenities::link(&store, "nope", wifi.id()).await.is_err());
        assert!(PlaceAmenities::link(&store, place.id(), "nope").await.is_err());
        assert!(PlaceAmenities::list(&store, "nope").await.is_err());
    }
}
