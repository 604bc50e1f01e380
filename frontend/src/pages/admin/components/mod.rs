pub mod absentees;
pub mod daily_report;
pub mod login;
pub mod meeting;
pub mod session_code;
