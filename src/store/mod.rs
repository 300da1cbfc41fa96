//! Storage interface and its backends: in-memory, JSON file, PostgreSQL.
//!
//! Backends own write serialization; callers never lock around them.

mod file;
mod memory;
mod postgres;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::config::StorageBackend;
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StoreError>;

    /// Every entity of `kind` in insertion order.
    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StoreError>;

    /// Insert or replace by (kind, id) and persist. Replacing keeps the original position.
    async fn save(&self, entity: &Entity) -> Result<(), StoreError>;

    /// Remove and persist. Deleting an absent entity is a no-op.
    async fn delete(&self, entity: &Entity) -> Result<(), StoreError>;

    /// Remove every entity in one write. On error nothing is removed.
    async fn delete_many(&self, entities: &[Entity]) -> Result<(), StoreError>;

    async fn count(&self, kind: Kind) -> Result<usize, StoreError>;

    /// Flush and release resources at shutdown.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Open the backend selected by configuration.
pub async fn open(backend: &StorageBackend) -> Result<Arc<dyn Storage>, StoreError> {
    Ok(match backend {
        StorageBackend::Memory => {
            tracing::info!("storage: memory");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File { path } => {
            tracing::info!(path = %path.display(), "storage: file");
            Arc::new(FileStore::open(path).await?)
        }
        StorageBackend::Database {
            url,
            schema,
            max_connections,
        } => {
            tracing::info!(schema = %schema, "storage: postgres");
            Arc::new(PgStore::connect(url, schema, *max_connections).await?)
        }
    })
}
