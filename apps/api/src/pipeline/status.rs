//! Status transition workflow.
//!
//! Transitions are deliberately unordered: a recruiter may move an
//! application from any stage to any other, including backward moves and
//! moves out of `hired`/`rejected`. The closed six-value enum is the only
//! validation; there is no transition table.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::store::applications;

/// Moves an application to `status`, touching only `status` and
/// `updated_at`. Idempotent; fails only when the id does not resolve.
pub async fn transition_status(
    pool: &PgPool,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, AppError> {
    let row = applications::update_status(pool, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    info!("Application {id} moved to {}", status.as_str());
    Ok(row)
}
