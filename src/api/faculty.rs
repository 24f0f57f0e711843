use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::faculty::{Faculty, FacultyAdvisor};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorQuery {
    pub section: String,
    pub degree_id: u64,
}

/// Faculty list with department names
#[utoipa::path(
    get,
    path = "/api/faculty",
    responses(
        (status = 200, description = "All faculty", body = [Faculty]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faculty"
)]
pub async fn list_faculty(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let faculty = sqlx::query_as::<_, Faculty>(
        r#"
        SELECT
            f.faculty_id, f.first_name, f.last_name, f.email, f.phone,
            f.designation, f.department_id, d.department_name,
            f.joining_date, f.status
        FROM faculty f
        LEFT JOIN departments d ON f.department_id = d.department_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch faculty");
        actix_web::error::ErrorInternalServerError("Failed to fetch faculty")
    })?;

    Ok(HttpResponse::Ok().json(faculty))
}

/// Advisor for a (section, degree) pair
#[utoipa::path(
    get,
    path = "/api/faculty-advisor",
    params(AdvisorQuery),
    responses(
        (status = 200, description = "Advisor for the section, or null", body = FacultyAdvisor),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faculty"
)]
pub async fn get_faculty_advisor(
    pool: web::Data<MySqlPool>,
    query: web::Query<AdvisorQuery>,
) -> actix_web::Result<impl Responder> {
    let advisor = sqlx::query_as::<_, FacultyAdvisor>(
        r#"
        SELECT f.faculty_id,
               CONCAT(f.first_name, ' ', f.last_name) AS name,
               f.email, f.phone, fa.section, fa.degree_id
        FROM faculty_advisor fa
        JOIN faculty f ON fa.faculty_id = f.faculty_id
        WHERE fa.section = ? AND fa.degree_id = ?
        "#,
    )
    .bind(&query.section)
    .bind(query.degree_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch faculty advisor");
        actix_web::error::ErrorInternalServerError("Failed to fetch class teacher")
    })?;

    Ok(HttpResponse::Ok().json(advisor))
}
