//! Aggregate views — read-only projections recomputed from the store on
//! every request. No caching layer; dashboards always show current truth.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::application::ApplicationStatus;
use crate::models::candidate::CandidateRow;
use crate::store::applications::ApplicationDetailRow;
use crate::store::interviews::InterviewDetailRow;

// ────────────────────────────────────────────────────────────────────────────
// Dashboard stats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_candidates: i64,
    pub total_applications: i64,
    pub interviews_scheduled: i64,
    pub offers_extended: i64,
}

pub async fn load_stats(pool: &PgPool) -> Result<Stats, AppError> {
    let total_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    let active_jobs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'active'")
            .fetch_one(pool)
            .await?;
    let total_candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await?;
    let total_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(pool)
        .await?;
    let interviews_scheduled: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM interviews WHERE status = 'scheduled'")
            .fetch_one(pool)
            .await?;
    let offers_extended: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE status = 'offer'")
            .fetch_one(pool)
            .await?;

    Ok(Stats {
        total_jobs,
        active_jobs,
        total_candidates,
        total_applications,
        interviews_scheduled,
        offers_extended,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline board
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PipelineColumn {
    pub status: ApplicationStatus,
    pub applications: Vec<ApplicationDetailRow>,
}

/// Partitions applications into the six kanban columns. Every application
/// lands in exactly one column; stages with no applications render as empty
/// columns.
pub fn group_into_columns(rows: Vec<ApplicationDetailRow>) -> Vec<PipelineColumn> {
    let mut columns: Vec<PipelineColumn> = ApplicationStatus::ALL
        .iter()
        .map(|&status| PipelineColumn {
            status,
            applications: Vec::new(),
        })
        .collect();

    for row in rows {
        if let Some(column) = columns.iter_mut().find(|c| c.status.as_str() == row.status) {
            column.applications.push(row);
        }
    }
    columns
}

// ────────────────────────────────────────────────────────────────────────────
// Ranked candidate list
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: CandidateRow,
    /// Maximum match score across this candidate's applications, if any
    /// application carries a score.
    pub best_match_score: Option<i32>,
    pub applications: Vec<ApplicationDetailRow>,
}

/// Annotates each candidate with its applications and orders by maximum
/// match score descending. Candidates without applications sort after all
/// candidates with at least one, newest first among themselves. Equal-score
/// ties keep insertion order (stable sort).
pub fn rank_candidates(
    candidates: Vec<CandidateRow>,
    mut applications: Vec<ApplicationDetailRow>,
) -> Vec<RankedCandidate> {
    let mut with_apps: Vec<RankedCandidate> = Vec::new();
    let mut without_apps: Vec<RankedCandidate> = Vec::new();

    for candidate in candidates {
        let mut mine: Vec<ApplicationDetailRow> = Vec::new();
        let mut rest: Vec<ApplicationDetailRow> = Vec::new();
        for app in applications {
            if app.candidate_id == candidate.id {
                mine.push(app);
            } else {
                rest.push(app);
            }
        }
        applications = rest;

        let best_match_score = mine.iter().filter_map(|a| a.match_score).max();
        let ranked = RankedCandidate {
            candidate,
            best_match_score,
            applications: mine,
        };
        if ranked.applications.is_empty() {
            without_apps.push(ranked);
        } else {
            with_apps.push(ranked);
        }
    }

    // Unscored applications rank below any scored ones but above
    // candidates with no applications at all.
    with_apps.sort_by_key(|r| std::cmp::Reverse(r.best_match_score.unwrap_or(-1)));
    without_apps.sort_by_key(|r| std::cmp::Reverse(r.candidate.created_at));

    with_apps.extend(without_apps);
    with_apps
}

// ────────────────────────────────────────────────────────────────────────────
// Interview schedule
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InterviewSchedule {
    pub upcoming: Vec<InterviewDetailRow>,
    pub past: Vec<InterviewDetailRow>,
}

/// Splits a chronological interview list into upcoming and past buckets
/// around `now`, preserving chronological order within each bucket.
pub fn bucket_interviews(
    rows: Vec<InterviewDetailRow>,
    now: DateTime<Utc>,
) -> InterviewSchedule {
    let (upcoming, past) = rows.into_iter().partition(|i| i.scheduled_at >= now);
    InterviewSchedule { upcoming, past }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn make_app(candidate_id: Uuid, status: &str, score: Option<i32>) -> ApplicationDetailRow {
        ApplicationDetailRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            candidate_id,
            status: status.to_string(),
            match_score: score,
            ai_analysis: None,
            applied_at: Utc::now(),
            updated_at: Utc::now(),
            candidate_name: "Jane Doe".to_string(),
            candidate_email: "jane@x.com".to_string(),
            job_title: "Backend Engineer".to_string(),
            job_department: "Engineering".to_string(),
        }
    }

    fn make_candidate(name: &str, created_at: DateTime<Utc>) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            resume_text: None,
            skills: vec![],
            experience: None,
            education: None,
            links: vec![],
            created_at,
        }
    }

    fn make_interview(scheduled_at: DateTime<Utc>) -> InterviewDetailRow {
        InterviewDetailRow {
            id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            scheduled_at,
            duration_minutes: 60,
            interviewer_name: None,
            meeting_link: None,
            status: "scheduled".to_string(),
            created_at: Utc::now(),
            candidate_name: "Jane Doe".to_string(),
            job_title: "Backend Engineer".to_string(),
        }
    }

    #[test]
    fn test_columns_partition_all_applications() {
        let c1 = Uuid::new_v4();
        let rows = vec![
            make_app(c1, "applied", Some(80)),
            make_app(c1, "interview", None),
            make_app(c1, "applied", Some(55)),
            make_app(c1, "rejected", Some(12)),
        ];
        let total = rows.len();
        let columns = group_into_columns(rows);

        assert_eq!(columns.len(), 6);
        let grouped: usize = columns.iter().map(|c| c.applications.len()).sum();
        assert_eq!(grouped, total);
        for column in &columns {
            for app in &column.applications {
                assert_eq!(app.status, column.status.as_str());
            }
        }
    }

    #[test]
    fn test_empty_stages_render_as_empty_columns() {
        let columns = group_into_columns(vec![]);
        assert_eq!(columns.len(), 6);
        assert!(columns.iter().all(|c| c.applications.is_empty()));
        assert_eq!(columns[0].status, ApplicationStatus::Applied);
        assert_eq!(columns[5].status, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_ranking_orders_by_max_score_then_no_apps_last() {
        let now = Utc::now();
        let a = make_candidate("Candidate A", now - Duration::days(3));
        let b = make_candidate("Candidate B", now - Duration::days(2));
        let c = make_candidate("Candidate C", now - Duration::days(1));

        let apps = vec![
            make_app(b.id, "applied", Some(40)),
            make_app(a.id, "applied", Some(90)),
            make_app(a.id, "rejected", Some(20)),
        ];

        let ranked = rank_candidates(vec![a.clone(), b.clone(), c.clone()], apps);
        let names: Vec<&str> = ranked.iter().map(|r| r.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["Candidate A", "Candidate B", "Candidate C"]);
        assert_eq!(ranked[0].best_match_score, Some(90));
        assert_eq!(ranked[1].best_match_score, Some(40));
        assert_eq!(ranked[2].best_match_score, None);
    }

    #[test]
    fn test_zero_application_candidates_sort_newest_first() {
        let now = Utc::now();
        let older = make_candidate("Older", now - Duration::days(10));
        let newer = make_candidate("Newer", now - Duration::days(1));

        let ranked = rank_candidates(vec![older, newer], vec![]);
        let names: Vec<&str> = ranked.iter().map(|r| r.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[test]
    fn test_unscored_applications_rank_below_scored() {
        let now = Utc::now();
        let scored = make_candidate("Scored", now - Duration::days(1));
        let unscored = make_candidate("Unscored", now - Duration::days(2));

        let apps = vec![
            make_app(unscored.id, "applied", None),
            make_app(scored.id, "applied", Some(5)),
        ];

        let ranked = rank_candidates(vec![unscored.clone(), scored.clone()], apps);
        assert_eq!(ranked[0].candidate.name, "Scored");
        assert_eq!(ranked[1].candidate.name, "Unscored");
    }

    #[test]
    fn test_each_application_attached_to_its_candidate() {
        let now = Utc::now();
        let a = make_candidate("A", now);
        let b = make_candidate("B", now);
        let apps = vec![
            make_app(a.id, "applied", Some(70)),
            make_app(b.id, "screening", Some(60)),
            make_app(a.id, "offer", Some(95)),
        ];

        let ranked = rank_candidates(vec![a.clone(), b.clone()], apps);
        let a_entry = ranked.iter().find(|r| r.candidate.id == a.id).unwrap();
        let b_entry = ranked.iter().find(|r| r.candidate.id == b.id).unwrap();
        assert_eq!(a_entry.applications.len(), 2);
        assert_eq!(b_entry.applications.len(), 1);
    }

    #[test]
    fn test_interview_bucketing_splits_around_now() {
        let now = Utc::now();
        let rows = vec![
            make_interview(now - Duration::hours(2)),
            make_interview(now + Duration::hours(1)),
            make_interview(now + Duration::days(1)),
        ];

        let schedule = bucket_interviews(rows, now);
        assert_eq!(schedule.past.len(), 1);
        assert_eq!(schedule.upcoming.len(), 2);
        assert!(schedule.upcoming[0].scheduled_at <= schedule.upcoming[1].scheduled_at);
    }
}
