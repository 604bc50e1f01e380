pub mod admin;
pub mod attendance;
pub mod config;
pub mod students;
