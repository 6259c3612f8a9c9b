use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Pipeline stage of an application. The six lowercase string literals are
/// the wire contract; transitions are unordered — any stage is reachable
/// from any other, so recruiters can correct mistakes at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// All stages in kanban column order.
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Screening,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    /// Rounded to the nearest integer at creation; write-once, never
    /// recomputed. Null when the matching capability was unavailable.
    pub match_score: Option<i32>,
    /// Structured payload from the matching capability:
    /// `{score, matched_skills, missing_skills, reasoning}`.
    pub ai_analysis: Option<Value>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_lowercase_literal() {
        for status in ApplicationStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_status_roundtrips_all_six() {
        for status in ApplicationStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: ApplicationStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_unknown_status_literal_is_rejected() {
        let result: Result<ApplicationStatus, _> = serde_json::from_str("\"shortlisted\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_all_covers_six_distinct_stages() {
        let mut seen: Vec<&str> = ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }
}
