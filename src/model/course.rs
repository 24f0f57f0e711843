use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Course joined with its assigned faculty, as served by the course list.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CourseRow {
    pub course_id: String,
    pub course_name: String,
    pub faculty_id: Option<String>,
    pub faculty_name: Option<String>,
}
