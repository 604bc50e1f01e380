pub mod attendance;
pub mod meeting_credentials;
pub mod session_code;
pub mod student;

pub use attendance::AttendanceRepository;
pub use meeting_credentials::MeetingCredentialsRepository;
pub use session_code::{SessionCodeRepository, StoredSessionCode};
pub use student::StudentRepository;
