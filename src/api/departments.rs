use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::error;

use crate::model::department::Department;

/// Department list
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments", body = [Department]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Departments"
)]
pub async fn list_departments(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT department_id, department_name, hod_id FROM departments",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch departments");
        actix_web::error::ErrorInternalServerError("Failed to fetch departments")
    })?;

    Ok(HttpResponse::Ok().json(departments))
}
