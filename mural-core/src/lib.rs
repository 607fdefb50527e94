//! mural-core: tipi condivisi tra client e server (modello Message, DTO HTTP, paginazione).
//! Niente I/O: solo serde, uuid e time.

pub mod models;
pub mod protocol;
pub mod utils;

// Re-export utili per ridurre i percorsi nel crate server
pub use models::message::Message;
pub use protocol::http::{AlterMessageRequest, RegisterMessageRequest, DELETE_CONFIRMATION};
pub use protocol::page::{Page, PageQuery, PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use utils::{new_message_id, now_utc, parse_message_id};
