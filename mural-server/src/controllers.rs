use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use mural_core::{
    parse_message_id, AlterMessageRequest, Message, Page, PageQuery, RegisterMessageRequest,
    DELETE_CONFIRMATION,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::service::MessageError;
use crate::AppState;

/// Risposta d'errore: status + testo semplice come body.
type Rejection = (StatusCode, String);

/// NotFound e IdentityMismatch finiscono entrambi in 400 con il testo dell'errore.
impl From<MessageError> for Rejection {
    fn from(e: MessageError) -> Self {
        match e {
            MessageError::NotFound | MessageError::IdentityMismatch => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            // il dettaglio è già nei log, non lo esponiamo al client
            MessageError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        }
    }
}

// Content-Type mancante o diverso da JSON -> 415, body non leggibile (es. troppo grande) con
// lo status di axum, JSON malformato o con campi sbagliati -> 400.
fn json_rejection(rejection: JsonRejection) -> Rejection {
    let status = match rejection {
        JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        JsonRejection::BytesRejection(_) => rejection.status(),
        _ => StatusCode::BAD_REQUEST,
    };
    (status, rejection.body_text())
}

// L'id del path deve essere un UUID canonico prima di arrivare al service.
fn path_id(raw: &str) -> Result<Uuid, Rejection> {
    parse_message_id(raw).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid id {:?}: expected a hyphenated UUID", raw),
        )
    })
}

/// Handler per POST /messages
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<RegisterMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), Rejection> {
    let Json(req) = payload.map_err(json_rejection)?;
    let message = state.service.register(req).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Handler per GET /messages/{id}
pub async fn find(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, Rejection> {
    let id = path_id(&raw_id)?;
    let message = state.service.find(id).await?;
    Ok(Json(message))
}

/// Handler per PUT /messages/{id}
pub async fn alter(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<AlterMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), Rejection> {
    let id = path_id(&raw_id)?;
    let Json(update) = payload.map_err(json_rejection)?;
    let message = state.service.alter(id, update).await?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

/// Handler per DELETE /messages/{id}
pub async fn remove(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, &'static str), Rejection> {
    let id = path_id(&raw_id)?;
    state.service.remove(id).await?;
    Ok((StatusCode::OK, DELETE_CONFIRMATION))
}

/// Handler per GET /messages?page=&size=
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Message>>, Rejection> {
    let request = query
        .into_request()
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "size must be greater than zero".to_string()))?;
    let page = state.service.list(request).await?;
    Ok(Json(page))
}
