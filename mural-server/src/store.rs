//! Persistenza dei messaggi: trait `MessageStore` e implementazione SQLite via sqlx.

use async_trait::async_trait;
use mural_core::{Message, Page, PageRequest};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Accesso per chiave primaria più la scansione paginata per data di creazione.
///
/// `update` e `delete` restituiscono `false` se la riga non esiste più: il service
/// controlla l'esistenza con una chiamata separata, senza isolamento tra le due.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Message>, StoreError>;
    async fn insert(&self, message: &Message) -> Result<(), StoreError>;
    /// Riscrive solo `content`: `id`, `author`, `created_at` e `like_count` restano quelli salvati.
    async fn update(&self, message: &Message) -> Result<bool, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    /// Pagina ordinata per `created_at` decrescente, con il totale delle righe.
    async fn page_newest_first(&self, request: PageRequest) -> Result<Page<Message>, StoreError>;
}

#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// created_at è salvato come nanosecondi Unix (UTC): l'ordinamento numerico è quello cronologico.
fn to_unix_nanos(at: OffsetDateTime) -> Result<i64, StoreError> {
    i64::try_from(at.unix_timestamp_nanos())
        .map_err(|_| StoreError::Corrupt(format!("timestamp out of range: {}", at)))
}

fn message_from_row(row: &SqliteRow) -> Result<Message, StoreError> {
    let raw_id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|e| StoreError::Corrupt(format!("invalid id {:?}: {}", raw_id, e)))?;
    let nanos: i64 = row.try_get("created_at")?;
    let created_at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))
        .map_err(|e| StoreError::Corrupt(format!("invalid created_at {} for {}: {}", nanos, id, e)))?;

    Ok(Message {
        id,
        author: row.try_get("author")?,
        content: row.try_get("content")?,
        created_at,
        like_count: row.try_get("like_count")?,
    })
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn get(&self, id: Uuid) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query(
            "SELECT id, author, content, created_at, like_count FROM messages WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(message_from_row).transpose()
    }

    async fn insert(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO messages (id, author, content, created_at, like_count) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(&message.author)
        .bind(&message.content)
        .bind(to_unix_nanos(message.created_at)?)
        .bind(message.like_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, message: &Message) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE messages SET content = ? WHERE id = ?")
            .bind(&message.content)
            .bind(message.id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn page_newest_first(&self, request: PageRequest) -> Result<Page<Message>, StoreError> {
        // count e select nella stessa transazione, così i totali corrispondono alla pagina
        let mut tx = self.pool.begin().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&mut *tx)
            .await?;

        // a parità di created_at vince l'inserimento più recente
        let rows = sqlx::query(
            "SELECT id, author, content, created_at, like_count FROM messages \
             ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let content = rows.iter().map(message_from_row).collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(content, request, total))
    }
}
