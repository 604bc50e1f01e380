pub mod admin;
pub mod attendance;
pub mod meeting;
pub mod report;
pub mod session_code;
pub mod student;
