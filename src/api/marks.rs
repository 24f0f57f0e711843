use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::mark::MarkRow;

const MARK_SELECT: &str = r#"
    SELECT
        m.mark_id,
        m.student_id,
        CONCAT(s.first_name, ' ', s.last_name) AS student_name,
        m.course_id,
        c.course_name,
        m.exam_type,
        m.marks_obtained,
        m.total_marks,
        m.exam_date
    FROM marks m
    LEFT JOIN courses c  ON m.course_id  = c.course_id
    LEFT JOIN students s ON m.student_id = s.student_id
"#;

#[derive(Deserialize, ToSchema)]
pub struct CreateMark {
    #[schema(example = "S1")]
    pub student_id: String,
    #[schema(example = "C1")]
    pub course_id: String,
    #[schema(example = "midterm")]
    pub exam_type: String,
    #[schema(example = 42.0)]
    pub marks_obtained: f64,
    #[schema(example = 50.0)]
    pub total_marks: f64,
    #[schema(example = "2024-05-20", format = "date", value_type = String)]
    pub exam_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateMark {
    #[schema(example = 45.0)]
    pub marks_obtained: Option<f64>,
    #[schema(example = 50.0)]
    pub total_marks: Option<f64>,
}

/// List all marks with course and student info
#[utoipa::path(
    get,
    path = "/api/marks",
    responses(
        (status = 200, description = "Mark rows with joined names", body = [MarkRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn list_marks(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let sql = format!("{MARK_SELECT} ORDER BY m.mark_id");

    let marks = sqlx::query_as::<_, MarkRow>(&sql)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch marks");
            actix_web::error::ErrorInternalServerError("Failed to fetch marks")
        })?;

    Ok(HttpResponse::Ok().json(marks))
}

/// Fetch a single mark
#[utoipa::path(
    get,
    path = "/api/marks/{mark_id}",
    params(
        ("mark_id", Path, description = "Mark ID")
    ),
    responses(
        (status = 200, description = "Mark found", body = MarkRow),
        (status = 404, description = "Mark not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn get_mark(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let mark_id = path.into_inner();
    let sql = format!("{MARK_SELECT} WHERE m.mark_id = ?");

    let mark = sqlx::query_as::<_, MarkRow>(&sql)
        .bind(mark_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, mark_id, "Failed to fetch mark");
            actix_web::error::ErrorInternalServerError("Failed to fetch mark")
        })?;

    match mark {
        Some(m) => Ok(HttpResponse::Ok().json(m)),
        None => Ok(HttpResponse::NotFound().json(json!({ "error": "Mark not found" }))),
    }
}

/// Create a mark record
#[utoipa::path(
    post,
    path = "/api/marks",
    request_body = CreateMark,
    responses(
        (status = 201, description = "Mark created", body = Object, example = json!({
            "mark_id": 17
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn create_mark(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateMark>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query(
        r#"
        INSERT INTO marks
        (student_id, course_id, exam_type, marks_obtained, total_marks, exam_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.student_id)
    .bind(&payload.course_id)
    .bind(&payload.exam_type)
    .bind(payload.marks_obtained)
    .bind(payload.total_marks)
    .bind(payload.exam_date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create mark");
        actix_web::error::ErrorInternalServerError("Failed to create mark")
    })?;

    Ok(HttpResponse::Created().json(json!({ "mark_id": result.last_insert_id() })))
}

/// Update obtained and/or total marks
#[utoipa::path(
    put,
    path = "/api/marks/{mark_id}",
    params(
        ("mark_id", Path, description = "Mark ID")
    ),
    request_body = UpdateMark,
    responses(
        (status = 200, description = "Mark updated", body = Object, example = json!({
            "success": true
        })),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Mark not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn update_mark(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateMark>,
) -> actix_web::Result<impl Responder> {
    let mark_id = path.into_inner();

    if payload.marks_obtained.is_none() && payload.total_marks.is_none() {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": "Nothing to update" })));
    }

    let mut fields = Vec::new();
    if payload.marks_obtained.is_some() {
        fields.push("marks_obtained = ?");
    }
    if payload.total_marks.is_some() {
        fields.push("total_marks = ?");
    }
    let sql = format!("UPDATE marks SET {} WHERE mark_id = ?", fields.join(", "));

    let mut update = sqlx::query(&sql);
    if let Some(obtained) = payload.marks_obtained {
        update = update.bind(obtained);
    }
    if let Some(total) = payload.total_marks {
        update = update.bind(total);
    }

    let result = update.bind(mark_id).execute(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, mark_id, "Failed to update mark");
        actix_web::error::ErrorInternalServerError("Failed to update mark")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({ "error": "Mark not found" })));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Delete a mark record
#[utoipa::path(
    delete,
    path = "/api/marks/{mark_id}",
    params(
        ("mark_id", Path, description = "Mark ID")
    ),
    responses(
        (status = 200, description = "Mark deleted", body = Object, example = json!({
            "success": true
        })),
        (status = 404, description = "Mark not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn delete_mark(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let mark_id = path.into_inner();

    let result = sqlx::query("DELETE FROM marks WHERE mark_id = ?")
        .bind(mark_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, mark_id, "Failed to delete mark");
            actix_web::error::ErrorInternalServerError("Failed to delete mark")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({ "error": "Mark not found" })));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
