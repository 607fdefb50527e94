use mural_core::{
    new_message_id, now_utc, AlterMessageRequest, Message, Page, PageRequest,
    RegisterMessageRequest,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::store::{MessageStore, StoreError};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Mensagem não encontrada")]
    NotFound,
    #[error("Mensagem atualizada não apresenta o mesmo id")]
    IdentityMismatch,
    /// Guasto del database, non un errore di dominio.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// Logica applicativa sopra un `MessageStore`.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Registra un nuovo messaggio: id, data di creazione e likeCount li decide il server.
    pub async fn register(&self, req: RegisterMessageRequest) -> Result<Message, MessageError> {
        let message = Message {
            id: new_message_id(),
            author: req.author,
            content: req.content,
            created_at: now_utc(),
            like_count: 0,
        };
        self.store.insert(&message).await.map_err(store_failure)?;
        info!(id = %message.id, author = %message.author, "message registered");
        Ok(message)
    }

    pub async fn find(&self, id: Uuid) -> Result<Message, MessageError> {
        match self.store.get(id).await.map_err(store_failure)? {
            Some(message) => Ok(message),
            None => {
                warn!(%id, "message not found");
                Err(MessageError::NotFound)
            }
        }
    }

    /// Aggiorna solo `content`. L'id nel body deve coincidere con quello del messaggio trovato.
    pub async fn alter(&self, id: Uuid, update: AlterMessageRequest) -> Result<Message, MessageError> {
        let mut message = self.find(id).await?;
        if update.id != Some(message.id) {
            warn!(%id, body_id = ?update.id, "update rejected: id mismatch");
            return Err(MessageError::IdentityMismatch);
        }

        message.content = update.content;
        // la riga può sparire tra find e update: in quel caso l'update non tocca nulla
        if !self.store.update(&message).await.map_err(store_failure)? {
            warn!(%id, "message vanished before update");
        }
        info!(%id, "message altered");
        Ok(message)
    }

    pub async fn remove(&self, id: Uuid) -> Result<bool, MessageError> {
        self.find(id).await?;
        if !self.store.delete(id).await.map_err(store_failure)? {
            warn!(%id, "message vanished before delete");
        }
        info!(%id, "message removed");
        Ok(true)
    }

    /// Pagina di messaggi, dal più recente.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Message>, MessageError> {
        let page = self
            .store
            .page_newest_first(request)
            .await
            .map_err(store_failure)?;
        tracing::debug!(
            page = request.page(),
            size = request.size(),
            total = page.total_elements,
            "messages listed"
        );
        Ok(page)
    }
}

fn store_failure(e: StoreError) -> MessageError {
    error!(error = %e, "message store failure");
    MessageError::Store(e)
}
