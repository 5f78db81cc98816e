pub mod admin_controllers;
pub mod auth_controllers;
pub mod category_controllers;
pub mod poll_controllers;
pub mod profile_controllers;
pub mod review_controllers;
pub mod vendor_controllers;
