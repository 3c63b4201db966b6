//! Postgres-backed document store (one `documents` table, JSONB bodies)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Pool, Postgres, Transaction};
use uuid::Uuid;

use super::{merge_fields, Collection, DocumentStore, StoredDocument};
use crate::{error::AppResult, models::UpdateResult};

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            body: row.body.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
}

impl PgDocumentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Serialize writers of one collection until the transaction ends
async fn lock_collection(
    tx: &mut Transaction<'_, Postgres>,
    collection: Collection,
) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(collection.name())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: Collection) -> AppResult<Option<StoredDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at FROM documents WHERE collection = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(collection.name())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(StoredDocument::from))
    }

    async fn find_all(&self, collection: Collection) -> AppResult<Vec<StoredDocument>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at FROM documents WHERE collection = $1 ORDER BY created_at",
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn insert_one(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection.name())
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn replace_all(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;
        lock_collection(&mut tx, collection).await?;

        let deleted = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection.name())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection.name())
            .bind(Json(body))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("Replaced {} document(s) in {}", deleted, collection);
        Ok(id)
    }

    async fn merge_one(&self, collection: Collection, fields: Value) -> AppResult<UpdateResult> {
        let mut tx = self.pool.begin().await?;
        lock_collection(&mut tx, collection).await?;

        let existing = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at FROM documents WHERE collection = $1 ORDER BY created_at LIMIT 1 FOR UPDATE",
        )
        .bind(collection.name())
        .fetch_optional(&mut *tx)
        .await?;

        let result = match existing {
            Some(row) => {
                let mut body = row.body.0;
                let modified = merge_fields(&mut body, fields);
                if modified {
                    sqlx::query("UPDATE documents SET body = $2 WHERE id = $1")
                        .bind(row.id)
                        .bind(Json(body))
                        .execute(&mut *tx)
                        .await?;
                }
                UpdateResult {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count: u64::from(modified),
                    upserted_count: 0,
                    upserted_id: None,
                }
            }
            None => {
                let id = Uuid::new_v4();
                sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(collection.name())
                    .bind(Json(fields))
                    .execute(&mut *tx)
                    .await?;
                UpdateResult {
                    acknowledged: true,
                    matched_count: 0,
                    modified_count: 0,
                    upserted_count: 1,
                    upserted_id: Some(id),
                }
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
