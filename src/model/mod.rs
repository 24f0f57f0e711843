pub mod attendance;
pub mod course;
pub mod department;
pub mod exam;
pub mod faculty;
pub mod mark;
pub mod notice;
pub mod student;
