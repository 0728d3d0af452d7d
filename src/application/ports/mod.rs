pub mod document_repository;
pub mod kv_store;
pub mod permission_port;
pub mod sheet_fetcher;
