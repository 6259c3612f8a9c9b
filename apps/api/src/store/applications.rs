use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};

/// An application with candidate and job identity denormalized onto it, as
/// consumed by the pipeline board, the recent list, and the ranked
/// candidate view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationDetailRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub match_score: Option<i32>,
    pub ai_analysis: Option<Value>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub job_department: String,
}

const DETAIL_SELECT: &str = r#"
    SELECT a.id, a.job_id, a.candidate_id, a.status, a.match_score,
           a.ai_analysis, a.applied_at, a.updated_at,
           c.name AS candidate_name, c.email AS candidate_email,
           j.title AS job_title, j.department AS job_department
    FROM applications a
    JOIN candidates c ON c.id = a.candidate_id
    JOIN jobs j ON j.id = a.job_id
"#;

/// Creates an application in the initial `applied` state. The score and
/// analysis are write-once here; nothing recomputes them later.
pub async fn create_application(
    pool: &PgPool,
    job_id: Uuid,
    candidate_id: Uuid,
    match_score: Option<i32>,
    ai_analysis: Option<Value>,
) -> Result<ApplicationRow, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (job_id, candidate_id, status, match_score, ai_analysis)
        VALUES ($1, $2, 'applied', $3, $4)
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(candidate_id)
    .bind(match_score)
    .bind(ai_analysis)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_application(pool: &PgPool, id: Uuid) -> Result<Option<ApplicationRow>, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Single-field, single-record status update. Returns None when the
/// application does not exist. Touches nothing but `status` and
/// `updated_at`.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<Option<ApplicationRow>, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// All applications, denormalized. Feeds the pipeline board and the ranked
/// candidate view.
pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ApplicationDetailRow>, AppError> {
    let query = format!("{DETAIL_SELECT} ORDER BY a.applied_at DESC");
    let rows = sqlx::query_as::<_, ApplicationDetailRow>(&query)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// One candidate's applications, denormalized, most recent first.
pub async fn list_detailed_for_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<ApplicationDetailRow>, AppError> {
    let query = format!("{DETAIL_SELECT} WHERE a.candidate_id = $1 ORDER BY a.applied_at DESC");
    let rows = sqlx::query_as::<_, ApplicationDetailRow>(&query)
        .bind(candidate_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Most-recent-first slice for the dashboard.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ApplicationDetailRow>, AppError> {
    let query = format!("{DETAIL_SELECT} ORDER BY a.applied_at DESC LIMIT $1");
    let rows = sqlx::query_as::<_, ApplicationDetailRow>(&query)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
