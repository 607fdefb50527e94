use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::utils::parse_message_id;
/*
    dto per le richieste http su /messages.
    I campi sconosciuti vengono ignorati: un client può rimandare indietro un Message completo.
*/

/// Corpo della risposta a DELETE /messages/{id}.
pub const DELETE_CONFIRMATION: &str = "mensagem excluida com sucesso";

// Register
/// Body di POST /messages. id, createdAt e likeCount li decide il server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMessageRequest {
    pub author: String,
    pub content: String,
}

// Alter
/// Body di PUT /messages/{id}. Solo `content` viene applicato; `id` deve coincidere con quello del path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterMessageRequest {
    #[serde(
        default,
        deserialize_with = "canonical_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
}

// Come per il path, l'id nel body deve essere nella forma canonica con i trattini.
fn canonical_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_message_id(&raw).ok_or_else(|| {
                de::Error::custom(format!("invalid id {:?}: expected hyphenated UUID", raw))
            })
        })
        .transpose()
}
