pub mod import_from_url;
pub mod import_rows;
