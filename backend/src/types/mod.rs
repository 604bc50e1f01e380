pub mod student_id;

pub use student_id::{StudentId, StudentIdError};
