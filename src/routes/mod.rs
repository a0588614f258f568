pub mod booking;
pub mod error;
pub mod flight;
pub mod health;
pub mod user;
