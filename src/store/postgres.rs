//! PostgreSQL backend: one JSONB object table per schema, keyed by (kind, id).

use super::{Storage, StoreError};
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub struct PgStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgStore {
    /// Create the database if missing, connect, and ensure the object table exists.
    pub async fn connect(database_url: &str, schema: &str, max_connections: u32) -> Result<Self, StoreError> {
        ensure_database_exists(database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = PgStore::new(pool, schema);
        store.ensure_tables().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStore {
            pool,
            schema: quote_ident(schema),
            table: format!("{}.{}", quote_ident(schema), quote_ident("objects")),
        }
    }

    /// Idempotent DDL. `seq` records insertion order; upserts keep it.
    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                payload JSONB NOT NULL,
                seq BIGSERIAL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (kind, id)
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

fn decode(kind: Kind, id: &str, payload: Value) -> Result<Entity, StoreError> {
    serde_json::from_value(payload).map_err(|e| StoreError::Corrupt {
        key: format!("{}.{}", kind.class_name(), id),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Storage for PgStore {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StoreError> {
        let sql = format!("SELECT payload FROM {} WHERE kind = $1 AND id = $2", self.table);
        let row: Option<(Value,)> = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(payload,)| decode(kind, id, payload)).transpose()
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StoreError> {
        let sql = format!("SELECT id, payload FROM {} WHERE kind = $1 ORDER BY seq", self.table);
        let rows: Vec<(String, Value)> = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|(id, payload)| decode(kind, &id, payload))
            .collect()
    }

    async fn save(&self, entity: &Entity) -> Result<(), StoreError> {
        let sql = format!(
            r#"
            INSERT INTO {} (kind, id, payload, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (kind, id)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()
            "#,
            self.table
        );
        let payload = entity.to_dict()?;
        tracing::debug!(kind = %entity.kind(), id = %entity.id(), "upsert");
        sqlx::query(&sql)
            .bind(entity.kind().class_name())
            .bind(entity.id())
            .bind(&payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE kind = $1 AND id = $2", self.table);
        sqlx::query(&sql)
            .bind(entity.kind().class_name())
            .bind(entity.id())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_many(&self, entities: &[Entity]) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE kind = $1 AND id = $2", self.table);
        let mut tx = self.pool.begin().await?;
        for entity in entities {
            sqlx::query(&sql)
                .bind(entity.kind().class_name())
                .bind(entity.id())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::debug!(count = entities.len(), "batch delete");
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE kind = $1", self.table);
        let (n,): (i64,) = sqlx::query_as(&sql)
            .bind(kind.class_name())
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = split_db_name(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (admin URL on the `postgres` database, target database name).
fn split_db_name(url: &str) -> (String, String) {
    let Some(slash) = url.rfind('/') else {
        return (url.to_string(), String::new());
    };
    let path_start = slash + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    (format!("{}postgres", base), db_name.to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_db_name_swaps_in_admin_database() {
        let (admin, db) = split_db_name("postgres://u:p@localhost:5432/hbnb_dev_db?sslmode=disable");
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "hbnb_dev_db");
    }

    #[test]
    fn quote_ident_doubles_quotes() {
        assert_eq!(quote_ident("hbnb"), "\"hbnb\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
