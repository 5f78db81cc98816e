pub mod models;
pub mod profile;
