pub mod access;
pub mod db;
pub mod sheets;
pub mod storage;
