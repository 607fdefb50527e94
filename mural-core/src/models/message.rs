use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Messaggio della bacheca, persistito dal server ed esposto sul wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Assegnato dal server alla registrazione, non cambia più.
    pub id: Uuid,
    pub author: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // UTC, RFC3339 sul wire
    pub like_count: i64,
}
