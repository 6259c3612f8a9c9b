use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a job posting. Serialized as the lowercase literal
/// (`"active"` etc.) — this string is part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub salary_range: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&JobStatus::Draft).unwrap(), "\"draft\"");
    }

    #[test]
    fn test_job_status_rejects_unknown_literal() {
        let result: Result<JobStatus, _> = serde_json::from_str("\"archived\"");
        assert!(result.is_err());
    }
}
