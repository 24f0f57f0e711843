use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Exam {
    pub exam_id: u64,
    pub name: String,
    #[schema(example = "2024-05-15", format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2024-05-25", format = "date", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Subject scheduled inside an exam, joined with the course name.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ExamSubject {
    pub course_id: String,
    pub course_name: Option<String>,
    #[schema(example = "2024-05-16", format = "date", value_type = Option<String>)]
    pub exam_date: Option<NaiveDate>,
    pub exam_time: Option<String>,
    pub room: Option<String>,
}
