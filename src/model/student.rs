use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Student row joined with department and degree names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct StudentRow {
    pub student_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    #[schema(example = "2004-05-12", format = "date", value_type = Option<String>)]
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department_id: Option<u64>,
    pub department_name: Option<String>,
    pub degree_id: Option<u64>,
    pub degree_name: Option<String>,
    pub section: Option<String>,
    pub batch: Option<String>,
    #[schema(example = "2022-08-01", format = "date", value_type = Option<String>)]
    pub admission_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub blood_group: Option<String>,
}
