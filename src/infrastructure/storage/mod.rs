pub mod document_repository_kv;
pub mod memory_kv;
