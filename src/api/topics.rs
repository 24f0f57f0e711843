use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Course with its assigned faculty, as the topic picker wants it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRow {
    pub course_id: String,
    pub course_name: String,
    pub faculty_name: Option<String>,
    pub faculty_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TopicRow {
    pub topic_id: u64,
    pub topic: String,
    pub description: Option<String>,
    pub important_questions: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub date_added: Option<NaiveDateTime>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopic {
    #[schema(example = "C1")]
    pub course_id: String,
    #[schema(example = "F102")]
    pub faculty_id: String,
    #[schema(example = "Normalization")]
    pub topic: String,
    pub description: Option<String>,
    pub important_questions: Option<String>,
}

const TOPIC_SELECT: &str = r#"
    SELECT
        topic_id,
        topic_title       AS topic,
        topic_description AS description,
        important_questions,
        date_posted       AS date_added
    FROM important_topics
"#;

/// Subjects with assigned faculty for the topic picker
#[utoipa::path(
    get,
    path = "/api/important-topics/subjects",
    responses(
        (status = 200, description = "Courses with assigned faculty", body = [SubjectRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Topics"
)]
pub async fn list_subjects(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let subjects = sqlx::query_as::<_, SubjectRow>(
        r#"
        SELECT
            c.course_id,
            c.course_name,
            CONCAT(f.first_name, ' ', f.last_name) AS faculty_name,
            f.faculty_id
        FROM courses c
        LEFT JOIN course_assignments ca ON ca.course_id = c.course_id
        LEFT JOIN faculty f             ON ca.faculty_id = f.faculty_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch subjects");
        actix_web::error::ErrorInternalServerError("Failed to fetch subjects.")
    })?;

    Ok(HttpResponse::Ok().json(subjects))
}

/// Important topics posted for a course, newest first
#[utoipa::path(
    get,
    path = "/api/important-topics/{course_id}",
    params(
        ("course_id", Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Topics for the course", body = [TopicRow]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Topics"
)]
pub async fn list_topics(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let course_id = path.into_inner();
    let sql = format!("{TOPIC_SELECT} WHERE course_id = ? ORDER BY date_posted DESC");

    let topics = sqlx::query_as::<_, TopicRow>(&sql)
        .bind(&course_id)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, course_id, "Failed to fetch important topics");
            actix_web::error::ErrorInternalServerError("Failed to fetch important topics.")
        })?;

    Ok(HttpResponse::Ok().json(topics))
}

/// Post a new important topic
#[utoipa::path(
    post,
    path = "/api/important-topics",
    request_body = CreateTopic,
    responses(
        (status = 201, description = "Topic created", body = TopicRow),
        (status = 400, description = "courseId, facultyId and topic are required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Topics"
)]
pub async fn create_topic(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateTopic>,
) -> actix_web::Result<impl Responder> {
    if payload.course_id.is_empty() || payload.faculty_id.is_empty() || payload.topic.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "courseId, facultyId and topic are required."
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO important_topics
        (course_id, faculty_id, topic_title, topic_description, important_questions)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.course_id)
    .bind(&payload.faculty_id)
    .bind(&payload.topic)
    .bind(payload.description.as_deref().unwrap_or(""))
    .bind(payload.important_questions.as_deref().unwrap_or(""))
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to upload topic");
        actix_web::error::ErrorInternalServerError("Failed to upload topic.")
    })?;

    let topic_id = result.last_insert_id();
    let sql = format!("{TOPIC_SELECT} WHERE topic_id = ?");

    let topic = sqlx::query_as::<_, TopicRow>(&sql)
        .bind(topic_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, topic_id, "Failed to re-fetch new topic");
            actix_web::error::ErrorInternalServerError("Failed to upload topic.")
        })?;

    match topic {
        Some(t) => Ok(HttpResponse::Created().json(t)),
        None => {
            warn!(topic_id, "Insert succeeded but could not re-select the row");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Topic was inserted but cannot retrieve it."
            })))
        }
    }
}
