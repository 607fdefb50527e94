pub mod http;
pub mod page;

// Re-export comodi
pub use http::{AlterMessageRequest, RegisterMessageRequest, DELETE_CONFIRMATION};
pub use page::{Page, PageQuery, PageRequest};
