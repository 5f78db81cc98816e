pub mod directory;
pub mod listing;
pub mod models;
pub mod moderation;
