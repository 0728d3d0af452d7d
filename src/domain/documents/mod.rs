pub mod aggregate;
pub mod document;
pub mod status;
pub mod store;
pub mod summary;
