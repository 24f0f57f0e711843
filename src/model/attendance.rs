use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance row joined with display names for the read API.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRow {
    pub attendance_id: u64,
    pub student_id: String,
    pub course_id: String,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub hours_present: Option<f64>,
    pub hours_absent: Option<f64>,
    pub total_classes: Option<f64>,
    pub status: Option<String>,
    pub marked_by_faculty: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_edited: Option<NaiveDateTime>,
    pub course_name: Option<String>,
    pub section: Option<String>,
    pub student_name: Option<String>,
    pub faculty_name: Option<String>,
}
