use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::error;

use crate::model::exam::{Exam, ExamSubject};

/// Exam list
#[utoipa::path(
    get,
    path = "/api/exams",
    responses(
        (status = 200, description = "All exams", body = [Exam]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Exams"
)]
pub async fn list_exams(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let exams = sqlx::query_as::<_, Exam>(
        "SELECT exam_id, name, start_date, end_date, status FROM exams",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch exams");
        actix_web::error::ErrorInternalServerError("Failed to fetch exams")
    })?;

    Ok(HttpResponse::Ok().json(exams))
}

/// Subjects scheduled for an exam
#[utoipa::path(
    get,
    path = "/api/exam-subjects/{exam_id}",
    params(
        ("exam_id", Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Subjects with course names", body = [ExamSubject]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Exams"
)]
pub async fn list_exam_subjects(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let exam_id = path.into_inner();

    let subjects = sqlx::query_as::<_, ExamSubject>(
        r#"
        SELECT es.course_id, c.course_name, es.exam_date, es.exam_time, es.room
        FROM exam_subjects es
        JOIN courses c ON es.course_id = c.course_id
        WHERE es.exam_id = ?
        "#,
    )
    .bind(exam_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, exam_id, "Failed to fetch exam subjects");
        actix_web::error::ErrorInternalServerError("Failed to fetch exam subjects")
    })?;

    Ok(HttpResponse::Ok().json(subjects))
}
