pub mod category_models;
pub mod poll_models;
pub mod review_models;
pub mod role_models;
pub mod user_models;
pub mod vendor_models;
pub mod vote_record_models;
