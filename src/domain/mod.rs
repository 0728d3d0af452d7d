pub mod documents;
pub mod meetings;
