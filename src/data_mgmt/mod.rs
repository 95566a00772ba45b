pub mod consolidate;
pub mod models;
pub mod output;
