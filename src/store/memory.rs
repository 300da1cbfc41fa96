use super::{Storage, StoreError};
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Insertion-ordered rows for one kind.
#[derive(Clone, Default)]
struct Table {
    order: Vec<String>,
    rows: HashMap<String, Entity>,
}

/// Per-kind tables shared by the memory and file backends.
#[derive(Clone, Default)]
pub(crate) struct Tables {
    by_kind: HashMap<Kind, Table>,
}

impl Tables {
    pub(crate) fn get(&self, kind: Kind, id: &str) -> Option<&Entity> {
        self.by_kind.get(&kind).and_then(|t| t.rows.get(id))
    }

    pub(crate) fn all(&self, kind: Kind) -> Vec<Entity> {
        self.by_kind
            .get(&kind)
            .map(|t| t.order.iter().filter_map(|id| t.rows.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the replaced entity, if any.
    pub(crate) fn upsert(&mut self, entity: Entity) -> Option<Entity> {
        let table = self.by_kind.entry(entity.kind()).or_default();
        let id = entity.id().to_string();
        let previous = table.rows.insert(id.clone(), entity);
        if previous.is_none() {
            table.order.push(id);
        }
        previous
    }

    pub(crate) fn remove(&mut self, kind: Kind, id: &str) -> Option<Entity> {
        let table = self.by_kind.get_mut(&kind)?;
        let removed = table.rows.remove(id)?;
        table.order.retain(|existing| existing != id);
        Some(removed)
    }

    pub(crate) fn count(&self, kind: Kind) -> usize {
        self.by_kind.get(&kind).map_or(0, |t| t.rows.len())
    }

    /// Every entity, grouped by kind, each group in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        Kind::ALL.into_iter().flat_map(move |kind| {
            self.by_kind
                .get(&kind)
                .into_iter()
                .flat_map(|t| t.order.iter().filter_map(move |id| t.rows.get(id)))
        })
    }
}

/// Non-persistent backend.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StoreError> {
        Ok(self.tables.read().await.get(kind, id).cloned())
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StoreError> {
        Ok(self.tables.read().await.all(kind))
    }

    async fn save(&self, entity: &Entity) -> Result<(), StoreError> {
        self.tables.write().await.upsert(entity.clone());
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> Result<(), StoreError> {
        self.tables.write().await.remove(entity.kind(), entity.id());
        Ok(())
    }

    async fn delete_many(&self, entities: &[Entity]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for entity in entities {
            tables.remove(entity.kind(), entity.id());
        }
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.count(kind))
    }
}
