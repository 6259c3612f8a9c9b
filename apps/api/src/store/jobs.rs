use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRow, JobStatus};

/// Payload for creating or fully updating a job posting.
#[derive(Debug, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub salary_range: Option<String>,
    #[serde(default = "default_status")]
    pub status: JobStatus,
}

fn default_status() -> JobStatus {
    JobStatus::Active
}

pub async fn create_job(pool: &PgPool, input: &JobInput) -> Result<JobRow, AppError> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (title, department, location, employment_type, description,
             requirements, responsibilities, salary_range, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.department)
    .bind(&input.location)
    .bind(&input.employment_type)
    .bind(&input.description)
    .bind(&input.requirements)
    .bind(&input.responsibilities)
    .bind(&input.salary_range)
    .bind(input.status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, AppError> {
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_jobs(pool: &PgPool, status: Option<JobStatus>) -> Result<Vec<JobRow>, AppError> {
    let rows = match status {
        Some(s) => {
            sqlx::query_as::<_, JobRow>(
                "SELECT * FROM jobs WHERE status = $1 ORDER BY created_at DESC",
            )
            .bind(s.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Full-field update. Returns None when the job does not exist.
pub async fn update_job(
    pool: &PgPool,
    id: Uuid,
    input: &JobInput,
) -> Result<Option<JobRow>, AppError> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2, department = $3, location = $4, employment_type = $5,
            description = $6, requirements = $7, responsibilities = $8,
            salary_range = $9, status = $10, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.department)
    .bind(&input.location)
    .bind(&input.employment_type)
    .bind(&input.description)
    .bind(&input.requirements)
    .bind(&input.responsibilities)
    .bind(&input.salary_range)
    .bind(input.status.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
