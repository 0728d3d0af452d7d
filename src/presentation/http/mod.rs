pub mod actor;
pub mod dashboard;
pub mod documents;
pub mod error;
pub mod health;
pub mod imports;
pub mod meetings;
pub mod reports;
