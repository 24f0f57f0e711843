use crate::api::attendance::{AttendanceQuery, UpdateAttendanceById, UpdateAttendanceByKey};
use crate::api::faculty::AdvisorQuery;
use crate::api::marks::{CreateMark, UpdateMark};
use crate::api::students::{
    EnrollmentQuery, EnrollmentRow, SectionRow, StudentListResponse, StudentProfile, StudentQuery,
};
use crate::api::timetable::TimetableSlot;
use crate::api::topics::{CreateTopic, SubjectRow, TopicRow};
use crate::model::attendance::AttendanceRow;
use crate::model::course::CourseRow;
use crate::model::department::Department;
use crate::model::exam::{Exam, ExamSubject};
use crate::model::faculty::{Faculty, FacultyAdvisor};
use crate::model::mark::MarkRow;
use crate::model::notice::NoticeRow;
use crate::model::student::StudentRow;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Portal API",
        version = "1.0.0",
        description = r#"
## Campus Portal

REST backend for a role-based (student/faculty) campus portal.

### Key Features
- **Attendance Ledger**
  - Per-(student, course, date) hour accrual with present/absent status derivation
  - Update by record id, or by natural key with find-or-create
- **Marks**
  - Enter, update, list, and delete exam marks
- **Portal Data**
  - Students, faculty, courses, departments, notices, exams, timetable

### Response Format
- JSON-based RESTful responses
- Attendance and mark lists come joined with display names

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::list_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::update_attendance_hours,

        crate::api::marks::list_marks,
        crate::api::marks::get_mark,
        crate::api::marks::create_mark,
        crate::api::marks::update_mark,
        crate::api::marks::delete_mark,

        crate::api::students::list_students,
        crate::api::students::get_student,
        crate::api::students::list_enrollments,
        crate::api::students::list_sections,

        crate::api::topics::list_subjects,
        crate::api::topics::list_topics,
        crate::api::topics::create_topic,

        crate::api::courses::list_courses,
        crate::api::faculty::list_faculty,
        crate::api::faculty::get_faculty_advisor,
        crate::api::departments::list_departments,
        crate::api::notices::list_notices,
        crate::api::exams::list_exams,
        crate::api::exams::list_exam_subjects,
        crate::api::timetable::generate_timetable
    ),
    components(
        schemas(
            AttendanceRow,
            AttendanceQuery,
            UpdateAttendanceById,
            UpdateAttendanceByKey,
            MarkRow,
            CreateMark,
            UpdateMark,
            StudentRow,
            StudentQuery,
            StudentListResponse,
            StudentProfile,
            EnrollmentQuery,
            EnrollmentRow,
            SectionRow,
            SubjectRow,
            TopicRow,
            CreateTopic,
            CourseRow,
            Faculty,
            FacultyAdvisor,
            AdvisorQuery,
            Department,
            NoticeRow,
            Exam,
            ExamSubject,
            TimetableSlot
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Marks", description = "Marks management APIs"),
        (name = "Students", description = "Student profile APIs"),
        (name = "Courses", description = "Course listing APIs"),
        (name = "Faculty", description = "Faculty listing APIs"),
        (name = "Departments", description = "Department listing APIs"),
        (name = "Notices", description = "Notice board APIs"),
        (name = "Topics", description = "Important topic APIs"),
        (name = "Exams", description = "Exam schedule APIs"),
        (name = "Timetable", description = "Timetable APIs"),
    )
)]
pub struct ApiDoc;
