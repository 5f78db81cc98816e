pub mod access;
pub mod auth;
pub mod error;
pub mod password;
pub mod session;
pub mod validation;
