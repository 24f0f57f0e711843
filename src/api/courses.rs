use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::error;

use crate::model::course::CourseRow;

/// Course list with assigned faculty
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses with assigned faculty", body = [CourseRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn list_courses(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let courses = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT
            c.course_id,
            c.course_name,
            ca.faculty_id,
            CONCAT(f.first_name, ' ', f.last_name) AS faculty_name
        FROM courses c
        LEFT JOIN course_assignments ca ON c.course_id = ca.course_id
        LEFT JOIN faculty f ON ca.faculty_id = f.faculty_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch courses");
        actix_web::error::ErrorInternalServerError("Failed to fetch courses")
    })?;

    Ok(HttpResponse::Ok().json(courses))
}
