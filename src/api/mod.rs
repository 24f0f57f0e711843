pub mod attendance;
pub mod courses;
pub mod departments;
pub mod exams;
pub mod faculty;
pub mod marks;
pub mod notices;
pub mod students;
pub mod timetable;
pub mod topics;
