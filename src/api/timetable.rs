use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimetableSlot {
    pub course_name: String,
    pub faculty_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Course/faculty assignment rows for the client-side timetable builder
#[utoipa::path(
    get,
    path = "/api/timetable/generate",
    responses(
        (status = 200, description = "Assignment rows", body = [TimetableSlot]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timetable"
)]
pub async fn generate_timetable(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let rows = sqlx::query_as::<_, TimetableSlot>(
        r#"
        SELECT c.course_name, ca.faculty_id, f.first_name, f.last_name
        FROM course_assignments ca
        INNER JOIN faculty f ON ca.faculty_id = f.faculty_id
        INNER JOIN courses c ON ca.course_id = c.course_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to generate timetable");
        actix_web::error::ErrorInternalServerError("Failed to generate timetable")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
