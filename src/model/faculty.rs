use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Faculty {
    pub faculty_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department_id: Option<u64>,
    pub department_name: Option<String>,
    #[schema(example = "2020-08-01", format = "date", value_type = Option<String>)]
    pub joining_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Advisor row for a (section, degree) pair.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct FacultyAdvisor {
    pub faculty_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub section: Option<String>,
    pub degree_id: Option<u64>,
}
