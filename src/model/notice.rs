use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct NoticeRow {
    pub notice_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub issued_by: Option<String>,
    pub faculty_name: Option<String>,
    pub issued_to: Option<String>,
    pub department_id: Option<u64>,
    pub department_name: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub date_posted: Option<NaiveDateTime>,
}
