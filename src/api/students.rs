use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::model::student::StudentRow;

const STUDENT_SELECT: &str = r#"
    SELECT
        s.student_id, s.first_name, s.last_name,
        CONCAT(s.first_name, ' ', s.last_name) AS name,
        s.dob, s.gender, s.email, s.phone, s.address,
        s.department_id, d.department_name,
        s.degree_id, deg.degree_name,
        s.section, s.batch, s.admission_date, s.status, s.blood_group
    FROM students s
    LEFT JOIN departments d ON s.department_id = d.department_id
    LEFT JOIN degrees deg   ON s.degree_id     = deg.degree_id
"#;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department_id: Option<u64>,
    pub degree_id: Option<u64>,
    pub section: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StudentListResponse {
    pub data: Vec<StudentRow>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 120)]
    pub total: i64,
}

/// Student profile enriched with the section's faculty advisor.
#[derive(Serialize, ToSchema)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: StudentRow,
    pub faculty_advisor_id: Option<String>,
    pub faculty_advisor_name: Option<String>,
    pub academic_advisor_email: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentQuery {
    pub student_id: String,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct EnrollmentRow {
    pub course_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct SectionRow {
    #[schema(example = "A")]
    pub id: String,
    #[schema(example = "Section A")]
    pub name: String,
}

/// Page window clamped to sane bounds; offset in u64 so an adversarial page
/// number cannot overflow.
fn page_window(page: Option<u32>, per_page: Option<u32>) -> (u32, u32, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = u64::from(page - 1) * u64::from(per_page);
    (page, per_page, offset)
}

/// Paginated student list
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Paginated student list", body = StudentListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn list_students(
    pool: web::Data<MySqlPool>,
    query: web::Query<StudentQuery>,
) -> actix_web::Result<impl Responder> {
    let (page, per_page, offset) = page_window(query.page, query.per_page);

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<sqlx::types::JsonValue> = Vec::new();

    if let Some(department_id) = query.department_id {
        conditions.push("s.department_id = ?");
        bindings.push(department_id.into());
    }

    if let Some(degree_id) = query.degree_id {
        conditions.push("s.degree_id = ?");
        bindings.push(degree_id.into());
    }

    if let Some(section) = &query.section {
        conditions.push("s.section = ?");
        bindings.push(section.clone().into());
    }

    if let Some(search) = &query.search {
        conditions.push("(s.first_name LIKE ? OR s.last_name LIKE ? OR s.email LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone().into());
        bindings.push(like.clone().into());
        bindings.push(like.into());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM students s {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting students");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count students");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "{STUDENT_SELECT} {} ORDER BY s.student_id LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, offset, "Fetching students");

    let mut data_query = sqlx::query_as::<_, StudentRow>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let students = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch students");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(StudentListResponse {
        data: students,
        page,
        per_page,
        total,
    }))
}

/// Single student profile with advisor info
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(
        ("student_id", Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentProfile),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let student_id = path.into_inner();
    let sql = format!("{STUDENT_SELECT} WHERE s.student_id = ?");

    let student = sqlx::query_as::<_, StudentRow>(&sql)
        .bind(&student_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, student_id, "Failed to fetch student");
            ErrorInternalServerError("Database error")
        })?;

    let Some(student) = student else {
        return Ok(HttpResponse::NotFound().json(json!({ "error": "Student not found" })));
    };

    // Advisor is assigned per (section, degree); missing assignment is not an error.
    let advisor = match (&student.section, student.degree_id) {
        (Some(section), Some(degree_id)) => {
            sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
                r#"
                SELECT fa.faculty_id,
                       CONCAT(f.first_name, ' ', f.last_name) AS faculty_name,
                       f.email
                FROM faculty_advisor fa
                JOIN faculty f ON fa.faculty_id = f.faculty_id
                WHERE fa.section = ? AND fa.degree_id = ?
                "#,
            )
            .bind(section)
            .bind(degree_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, student_id, "Failed to fetch faculty advisor");
                ErrorInternalServerError("Database error")
            })?
        }
        _ => None,
    };

    let (advisor_id, advisor_name, advisor_email) = match advisor {
        Some((id, name, email)) => (Some(id), name, email),
        None => (None, None, None),
    };

    Ok(HttpResponse::Ok().json(StudentProfile {
        student,
        faculty_advisor_id: advisor_id,
        faculty_advisor_name: advisor_name,
        academic_advisor_email: advisor_email,
    }))
}

/// Course ids a student is enrolled in
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentQuery),
    responses(
        (status = 200, description = "Enrolled course ids", body = [EnrollmentRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn list_enrollments(
    pool: web::Data<MySqlPool>,
    query: web::Query<EnrollmentQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = sqlx::query_as::<_, EnrollmentRow>(
        r#"
        SELECT e.course_id
        FROM enrollments e
        WHERE e.student_id = ? AND e.status = 'enrolled'
        "#,
    )
    .bind(&query.student_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, student_id = %query.student_id, "Failed to fetch enrollments");
        ErrorInternalServerError("Failed to fetch enrollments")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Distinct student sections
#[utoipa::path(
    get,
    path = "/api/sections",
    responses(
        (status = 200, description = "Distinct sections", body = [SectionRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn list_sections(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let sections =
        sqlx::query_scalar::<_, Option<String>>("SELECT DISTINCT section FROM students")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch sections");
                ErrorInternalServerError("Failed to fetch sections")
            })?;

    let rows: Vec<SectionRow> = sections
        .into_iter()
        .flatten()
        .map(|section| SectionRow {
            name: format!("Section {}", section),
            id: section,
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn page_window_defaults_and_clamps() {
        assert_eq!(page_window(None, None), (1, 20, 0));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(page_window(Some(3), Some(500)), (3, 100, 200));
    }

    #[test]
    fn page_window_survives_adversarial_page() {
        let (page, per_page, offset) = page_window(Some(u32::MAX), Some(100));
        assert_eq!(page, u32::MAX);
        assert_eq!(per_page, 100);
        assert_eq!(offset, u64::from(u32::MAX - 1) * 100);
    }
}
