use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mark row joined with student and course names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct MarkRow {
    pub mark_id: u64,
    pub student_id: String,
    pub student_name: Option<String>,
    pub course_id: String,
    pub course_name: Option<String>,
    pub exam_type: Option<String>,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    #[schema(example = "2024-05-20", format = "date", value_type = Option<String>)]
    pub exam_date: Option<NaiveDate>,
}
