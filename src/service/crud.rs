//! Generic CRUD over the storage interface, driven by each kind's spec.

use crate::config::{KindRegistry, KindSpec};
use crate::error::AppError;
use crate::models::{Entity, Kind};
use crate::service::RequestValidator;
use crate::store::Storage;
use serde_json::{Map, Value};

pub struct CrudService;

impl CrudService {
    /// All entities of the kind. With `parent_id`, the parent must exist and only its
    /// children are returned.
    pub async fn list(
        storage: &dyn Storage,
        spec: &KindSpec,
        parent_id: Option<&str>,
    ) -> Result<Vec<Entity>, AppError> {
        let rows = storage.all(spec.kind).await?;
        let (Some(parent), Some(parent_id)) = (spec.parent, parent_id) else {
            return Ok(rows);
        };
        Self::require(storage, parent.kind, parent_id).await?;
        Ok(rows
            .into_iter()
            .filter(|e| e.foreign_key(parent.field) == Some(parent_id))
            .collect())
    }

    pub async fn read(storage: &dyn Storage, spec: &KindSpec, id: &str) -> Result<Entity, AppError> {
        tracing::debug!(kind = %spec.kind, id = %id, "read");
        Self::require(storage, spec.kind, id).await
    }

    /// Create from a request body. The parent is checked before the body, so a bad parent
    /// id is reported as not found even when the body is also invalid.
    pub async fn create(
        storage: &dyn Storage,
        spec: &KindSpec,
        parent_id: Option<&str>,
        body: Option<Map<String, Value>>,
    ) -> Result<Entity, AppError> {
        let parent = match (spec.parent, parent_id) {
            (Some(fk), Some(id)) => {
                Self::require(storage, fk.kind, id).await?;
                Some((fk.field, id))
            }
            _ => None,
        };
        let mut body = body.ok_or(AppError::NotJson)?;
        RequestValidator::require(&body, spec.required)?;
        RequestValidator::references_exist(storage, spec, &body).await?;
        if let Some((field, id)) = parent {
            body.insert(field.to_string(), Value::String(id.to_string()));
        }

        let entity = Entity::build(spec.kind, &body)?;
        storage.save(&entity).await?;
        tracing::info!(kind = %spec.kind, id = %entity.id(), "created");
        Ok(entity)
    }

    /// Apply every mutable key of `body` and bump `updated_at`. Immutable and unknown keys
    /// are skipped; a type error leaves the stored entity untouched.
    pub async fn update(
        storage: &dyn Storage,
        spec: &KindSpec,
        id: &str,
        body: Option<Map<String, Value>>,
    ) -> Result<Entity, AppError> {
        let mut entity = Self::require(storage, spec.kind, id).await?;
        let body = body.ok_or(AppError::NotJson)?;
        for (key, value) in &body {
            if spec.is_immutable(key) {
                continue;
            }
            if !entity.set_field(key, value)? {
                tracing::debug!(kind = %spec.kind, key = %key, "ignoring unknown field");
            }
        }
        entity.touch();
        storage.save(&entity).await?;
        tracing::info!(kind = %spec.kind, id = %id, "updated");
        Ok(entity)
    }

    /// Delete the entity and, following each kind's cascade list, its dependents, in a
    /// single storage write: either all of them go or none do.
    pub async fn delete(
        storage: &dyn Storage,
        kinds: &KindRegistry,
        spec: &KindSpec,
        id: &str,
    ) -> Result<(), AppError> {
        let root = Self::require(storage, spec.kind, id).await?;
        let mut doomed = vec![root];
        let mut next = 0;
        while next < doomed.len() {
            let owner_kind = doomed[next].kind();
            let owner_id = doomed[next].id().to_string();
            for fk in kinds.spec(owner_kind)?.cascade {
                let children = storage.all(fk.kind).await?;
                doomed.extend(
                    children
                        .into_iter()
                        .filter(|c| c.foreign_key(fk.field) == Some(owner_id.as_str())),
                );
            }
            next += 1;
        }
        doomed.reverse();
        storage.delete_many(&doomed).await?;
        tracing::info!(kind = %spec.kind, id = %id, removed = doomed.len(), "deleted");
        Ok(())
    }

    async fn require(storage: &dyn Storage, kind: Kind, id: &str) -> Result<Entity, AppError> {
        storage
            .get(kind, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {}", kind, id)))
    }
}
