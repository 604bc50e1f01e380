pub mod admin;
pub mod attendance;
pub mod home;
pub mod not_found;
pub mod register;

pub use admin::AdminPage;
pub use attendance::AttendancePage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
