use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{InterviewRow, InterviewStatus};

#[derive(Debug, Deserialize)]
pub struct NewInterview {
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    pub interviewer_name: Option<String>,
    pub meeting_link: Option<String>,
}

fn default_duration() -> i32 {
    60
}

/// Partial update: reschedule, reassign, or change scheduling state.
#[derive(Debug, Deserialize)]
pub struct InterviewUpdate {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub interviewer_name: Option<String>,
    pub meeting_link: Option<String>,
    pub status: Option<InterviewStatus>,
}

/// An interview with its application's candidate and job denormalized on.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InterviewDetailRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub interviewer_name: Option<String>,
    pub meeting_link: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub candidate_name: String,
    pub job_title: String,
}

pub async fn create_interview(
    pool: &PgPool,
    new: &NewInterview,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews
            (application_id, scheduled_at, duration_minutes, interviewer_name, meeting_link)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(new.application_id)
    .bind(new.scheduled_at)
    .bind(new.duration_minutes)
    .bind(&new.interviewer_name)
    .bind(&new.meeting_link)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_interview(
    pool: &PgPool,
    id: Uuid,
    update: &InterviewUpdate,
) -> Result<Option<InterviewRow>, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        UPDATE interviews
        SET scheduled_at = COALESCE($2, scheduled_at),
            duration_minutes = COALESCE($3, duration_minutes),
            interviewer_name = COALESCE($4, interviewer_name),
            meeting_link = COALESCE($5, meeting_link),
            status = COALESCE($6, status)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.scheduled_at)
    .bind(update.duration_minutes)
    .bind(&update.interviewer_name)
    .bind(&update.meeting_link)
    .bind(update.status.map(|s| s.as_str()))
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// All interviews in chronological order, enriched for display.
pub async fn list_detailed(pool: &PgPool) -> Result<Vec<InterviewDetailRow>, AppError> {
    let rows = sqlx::query_as::<_, InterviewDetailRow>(
        r#"
        SELECT i.id, i.application_id, i.scheduled_at, i.duration_minutes,
               i.interviewer_name, i.meeting_link, i.status, i.created_at,
               c.name AS candidate_name, j.title AS job_title
        FROM interviews i
        JOIN applications a ON a.id = i.application_id
        JOIN candidates c ON c.id = a.candidate_id
        JOIN jobs j ON j.id = a.job_id
        ORDER BY i.scheduled_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
