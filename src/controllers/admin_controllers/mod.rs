pub mod analytics;
pub mod models;
pub mod roles;
pub mod stats;
pub mod users;
