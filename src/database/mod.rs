pub mod booking;
pub mod in_memory_repository;
pub mod session;
pub mod user;
