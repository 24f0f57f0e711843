use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    pub department_id: u64,
    pub department_name: String,
    pub hod_id: Option<String>,
}
