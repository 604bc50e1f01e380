pub mod auth;
pub mod dashboard;
pub mod meeting;
pub mod reports;
pub mod session_codes;

pub use auth::*;
pub use dashboard::*;
pub use meeting::*;
pub use reports::*;
pub use session_codes::*;
