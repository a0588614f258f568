pub mod booking;
pub mod flight;
pub mod health;
pub mod session;
pub mod user;
