use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::error;

use crate::model::notice::NoticeRow;

/// Notice list with issuing faculty and department names
#[utoipa::path(
    get,
    path = "/api/notices",
    responses(
        (status = 200, description = "All notices", body = [NoticeRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Notices"
)]
pub async fn list_notices(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let notices = sqlx::query_as::<_, NoticeRow>(
        r#"
        SELECT
            n.notice_id, n.title, n.description, n.issued_by,
            CONCAT(f.first_name, ' ', f.last_name) AS faculty_name,
            n.issued_to, n.department_id, d.department_name, n.date_posted
        FROM notices n
        LEFT JOIN faculty f ON n.issued_by = f.faculty_id
        LEFT JOIN departments d ON n.department_id = d.department_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch notices");
        actix_web::error::ErrorInternalServerError("Failed to fetch notices")
    })?;

    Ok(HttpResponse::Ok().json(notices))
}
