pub mod dashboard;
pub mod filters;
pub mod normalize;
pub mod reports;
