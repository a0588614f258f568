pub mod auth;
pub mod availability;
