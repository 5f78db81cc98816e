pub mod list;
pub mod manage;
pub mod models;
