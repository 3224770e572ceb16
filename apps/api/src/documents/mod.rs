// Document storage: résumé and job-description uploads, append-only per owner.

pub mod handlers;
pub mod sanitize;
pub mod store;

pub use store::{store_document, DocumentStore, PgDocumentStore, UploadedDocument};
