pub mod progress;
pub mod tracker;
