pub mod clear_document;
pub mod create_document;
pub mod error;
pub mod get_dashboard;
pub mod list_documents;
pub mod update_document;
