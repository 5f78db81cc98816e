pub mod jwt;
pub mod role;
