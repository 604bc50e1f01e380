pub mod absence;
pub mod attendance;
pub mod attendance_status;
pub mod registration;
pub mod reports;
pub mod settings;
pub mod token_revocation;
