pub mod admin_routes;
pub mod auth_routes;
pub mod category_routes;
pub mod poll_routes;
pub mod profile_routes;
pub mod review_routes;
pub mod vendor_routes;
