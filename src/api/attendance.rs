use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::ledger::{self, AttendanceDelta, DeltaOutcome};
use crate::model::attendance::AttendanceRow;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    /// Filter by the student the rows belong to
    pub student_id: Option<String>,
    /// Filter by the faculty member who last marked the rows
    pub faculty_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceById {
    #[schema(example = 2.0)]
    pub inc_hours: f64,
    #[schema(example = true)]
    pub is_present: bool,
    #[schema(example = "F102")]
    pub faculty_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceByKey {
    #[schema(example = "S1")]
    pub student_id: String,
    #[schema(example = "C1")]
    pub course_id: String,
    /// Date-only or datetime; any time component is stripped before the key lookup
    #[schema(example = "2024-01-10")]
    pub date: String,
    #[schema(example = 2.0)]
    pub inc_hours: f64,
    #[schema(example = true)]
    pub is_present: bool,
    #[schema(example = "F102")]
    pub faculty_id: Option<String>,
}

/// List attendance with student/course/faculty names
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance rows with joined names", body = [AttendanceRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let mut sql = String::from(
        r#"
        SELECT
            a.attendance_id,
            a.student_id,
            a.course_id,
            a.date,
            a.hours_present,
            a.hours_absent,
            a.total_classes,
            a.status,
            a.marked_by_faculty,
            a.last_edited,
            c.course_name,
            s.section,
            CONCAT(s.first_name, ' ', s.last_name) AS student_name,
            CONCAT(f.first_name, ' ', f.last_name) AS faculty_name
        FROM attendance a
        LEFT JOIN courses  c ON a.course_id         = c.course_id
        LEFT JOIN students s ON a.student_id        = s.student_id
        LEFT JOIN faculty  f ON a.marked_by_faculty = f.faculty_id
        "#,
    );

    let mut binding: Option<&String> = None;
    if let Some(student_id) = &query.student_id {
        sql.push_str(" WHERE a.student_id = ?");
        binding = Some(student_id);
    } else if let Some(faculty_id) = &query.faculty_id {
        sql.push_str(" WHERE a.marked_by_faculty = ?");
        binding = Some(faculty_id);
    }

    debug!(sql = %sql, binding = ?binding, "Fetching attendance");

    let mut data_query = sqlx::query_as::<_, AttendanceRow>(&sql);
    if let Some(b) = binding {
        data_query = data_query.bind(b);
    }

    let rows = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch attendance");
        actix_web::error::ErrorInternalServerError("Failed to fetch attendance")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Post an hour increment against an existing record
#[utoipa::path(
    put,
    path = "/api/attendance/{attendance_id}",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendanceById,
    responses(
        (status = 200, description = "Record updated", body = Object, example = json!({
            "success": true
        })),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "No record with that id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAttendanceById>,
) -> actix_web::Result<impl Responder> {
    let attendance_id = path.into_inner();
    let payload = payload.into_inner();

    let delta = AttendanceDelta::new(payload.inc_hours, payload.is_present, payload.faculty_id)?;

    ledger::record_by_id(pool.get_ref(), attendance_id, delta).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Post an hour increment by (student, course, date), creating the row if absent
#[utoipa::path(
    put,
    path = "/api/attendance/update-hours",
    request_body = UpdateAttendanceByKey,
    responses(
        (status = 200, description = "Record updated or created", body = Object, example = json!({
            "success": true,
            "inserted": true
        })),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance_hours(
    pool: web::Data<MySqlPool>,
    payload: web::Json<UpdateAttendanceByKey>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    ledger::validate_natural_key(&payload.student_id, &payload.course_id)?;

    let date = ledger::normalize_date(&payload.date)?;
    let delta = AttendanceDelta::new(payload.inc_hours, payload.is_present, payload.faculty_id)?;

    let outcome =
        ledger::record_by_key(pool.get_ref(), &payload.student_id, &payload.course_id, date, delta)
            .await?;

    let body = match outcome {
        DeltaOutcome::Inserted { .. } => json!({ "success": true, "inserted": true }),
        DeltaOutcome::Updated { .. } => json!({ "success": true, "updated": true }),
    };

    Ok(HttpResponse::Ok().json(body))
}
