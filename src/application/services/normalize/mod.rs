pub mod date;
pub mod row;
