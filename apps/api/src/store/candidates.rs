use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{is_unique_violation, AppError};
use crate::models::candidate::CandidateRow;

/// Fields for a new candidate record, assembled by the submit workflow from
/// form input plus AI-extracted profile data (which may be empty).
#[derive(Debug)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_text: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub links: Vec<String>,
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<CandidateRow>, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Inserts a candidate, relying on the UNIQUE(email) constraint as the only
/// guard against the concurrent-submission race. A unique violation means
/// another request won the insert; resolve it by re-fetching the winner and
/// proceeding as the "already exists" branch.
pub async fn create_candidate(pool: &PgPool, new: &NewCandidate) -> Result<CandidateRow, AppError> {
    let inserted = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (name, email, phone, resume_text, skills, experience, education, links)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.resume_text)
    .bind(&new.skills)
    .bind(&new.experience)
    .bind(&new.education)
    .bind(&new.links)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(row) => Ok(row),
        Err(e) if is_unique_violation(&e) => {
            info!("Candidate insert lost race for {}; re-fetching", new.email);
            find_by_email(pool, &new.email).await?.ok_or_else(|| {
                AppError::Conflict(format!(
                    "Candidate {} vanished after duplicate-key conflict",
                    new.email
                ))
            })
        }
        Err(e) => Err(e.into()),
    }
}
