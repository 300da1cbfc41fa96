//! JSON file backend. The file maps `"<Class>.<id>"` to each entity's dictionary.

use super::memory::Tables;
use super::{Storage, StoreError};
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub struct FileStore {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl FileStore {
    /// Load `path` if it exists; a missing file starts an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => load(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), "file storage loaded");
        Ok(FileStore {
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Write the whole document to a sibling temp file, then rename over the target.
    async fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let mut doc = Map::new();
        for entity in tables.iter() {
            doc.insert(storage_key(entity.kind(), entity.id()), entity.to_dict()?);
        }
        let bytes = serde_json::to_vec(&Value::Object(doc))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "file storage written");
        Ok(())
    }
}

fn storage_key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind.class_name(), id)
}

fn load(raw: &str) -> Result<Tables, StoreError> {
    let mut tables = Tables::default();
    if raw.trim().is_empty() {
        return Ok(tables);
    }
    let doc: Map<String, Value> = serde_json::from_str(raw)?;
    for (key, value) in doc {
        let entity: Entity = serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        if key != storage_key(entity.kind(), entity.id()) {
            return Err(StoreError::Corrupt {
                key,
                reason: "key does not match class and id".into(),
            });
        }
        tables.upsert(entity);
    }
    Ok(tables)
}

#[async_trait]
impl Storage for FileStore {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StoreError> {
        Ok(self.tables.read().await.get(kind, id).cloned())
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StoreError> {
        Ok(self.tables.read().await.all(kind))
    }

    async fn save(&self, entity: &Entity) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let snapshot = tables.clone();
        tables.upsert(entity.clone());
        if let Err(e) = self.persist(&tables).await {
            *tables = snapshot;
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> Result<(), StoreError> {
        self.delete_many(std::slice::from_ref(entity)).await
    }

    async fn delete_many(&self, entities: &[Entity]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let snapshot = tables.clone();
        let mut removed = 0;
        for entity in entities {
            if tables.remove(entity.kind(), entity.id()).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            return Ok(());
        }
        if let Err(e) = self.persist(&tables).await {
            *tables = snapshot;
            return Err(e);
        }
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.count(kind))
    }

    async fn close(&self) -> Result<(), StoreError> {
        let tables = self.tables.read().await;
        self.persist(&tables).await
    }
}
