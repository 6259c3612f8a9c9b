//! Submit workflow — the one state-changing operation with real policy.
//!
//! AI enrichment is best-effort: profile extraction and match scoring each
//! fail soft (empty profile / null score). Resume text extraction is the
//! exception — a resume we cannot read fails the whole request.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract;
use crate::matching::ResumeProfile;
use crate::models::application::ApplicationRow;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;
use crate::store::{applications, candidates, jobs};

/// How long we wait on each AI call before proceeding without it.
const AI_CALL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(45);

/// A parsed submission: required form fields plus the resume blob.
#[derive(Debug)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub job_id: Uuid,
    pub resume_filename: String,
    pub resume_bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub candidate: CandidateRow,
    pub application: ApplicationRow,
}

/// Creates (or reuses) the candidate and creates a fresh application with a
/// best-effort match score. Succeeds whenever the job exists and the resume
/// is readable, regardless of AI availability.
pub async fn submit_application(
    state: &AppState,
    submission: Submission,
) -> Result<SubmitResponse, AppError> {
    validate_submission(&submission)?;

    let job = jobs::get_job(&state.db, submission.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", submission.job_id)))?;

    // Extraction failure is fatal for the request; everything after it
    // degrades gracefully.
    let resume_text = extract::extract_text(&submission.resume_bytes, &submission.resume_filename)?;

    let candidate = match candidates::find_by_email(&state.db, &submission.email).await? {
        Some(existing) => existing,
        None => {
            let profile = extract_profile_best_effort(state, &resume_text).await;
            candidates::create_candidate(
                &state.db,
                &candidates::NewCandidate {
                    name: submission.name.clone(),
                    email: submission.email.clone(),
                    phone: submission.phone.clone(),
                    resume_text: Some(resume_text.clone()),
                    skills: profile.skills,
                    experience: none_if_empty(profile.experience),
                    education: none_if_empty(profile.education),
                    links: profile.links,
                },
            )
            .await?
        }
    };

    let (match_score, ai_analysis) = score_best_effort(state, &candidate, &job).await;

    let application = applications::create_application(
        &state.db,
        job.id,
        candidate.id,
        match_score,
        ai_analysis,
    )
    .await?;

    Ok(SubmitResponse {
        candidate,
        application,
    })
}

/// Extracts a structured profile from resume text, falling back to an empty
/// profile when the AI capability is degraded or slow.
async fn extract_profile_best_effort(state: &AppState, resume_text: &str) -> ResumeProfile {
    match tokio::time::timeout(AI_CALL_TIMEOUT, state.scorer.extract_profile(resume_text)).await {
        Ok(Ok(profile)) => profile,
        Ok(Err(e)) => {
            warn!("Resume profile extraction failed, creating candidate without profile: {e}");
            ResumeProfile::default()
        }
        Err(_) => {
            warn!("Resume profile extraction timed out, creating candidate without profile");
            ResumeProfile::default()
        }
    }
}

/// Scores the candidate against the job, mapping any failure or timeout to
/// "no score" — matching is an enrichment, never a gate.
async fn score_best_effort(
    state: &AppState,
    candidate: &CandidateRow,
    job: &crate::models::job::JobRow,
) -> (Option<i32>, Option<serde_json::Value>) {
    let experience = candidate.experience.as_deref().unwrap_or("");
    let scored = tokio::time::timeout(
        AI_CALL_TIMEOUT,
        state.scorer.score_match(&candidate.skills, experience, job),
    )
    .await;

    match scored {
        Ok(Ok(analysis)) => (
            Some(analysis.rounded_score()),
            Some(analysis.to_stored_json()),
        ),
        Ok(Err(e)) => {
            warn!("Match scoring failed, storing application without score: {e}");
            (None, None)
        }
        Err(_) => {
            warn!("Match scoring timed out, storing application without score");
            (None, None)
        }
    }
}

fn validate_submission(submission: &Submission) -> Result<(), AppError> {
    if submission.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    let email = submission.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    if submission.resume_bytes.is_empty() {
        return Err(AppError::Validation("resume file is required".to_string()));
    }
    Ok(())
}

fn none_if_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_submission() -> Submission {
        Submission {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
            job_id: Uuid::new_v4(),
            resume_filename: "resume.pdf".to_string(),
            resume_bytes: b"%PDF-1.7".to_vec(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_submission(&make_submission()).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut submission = make_submission();
        submission.name = "   ".to_string();
        assert!(matches!(
            validate_submission(&submission),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_email_rejected() {
        let mut submission = make_submission();
        submission.email = String::new();
        assert!(validate_submission(&submission).is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut submission = make_submission();
        submission.email = "not-an-email".to_string();
        assert!(validate_submission(&submission).is_err());
    }

    #[test]
    fn test_empty_resume_rejected() {
        let mut submission = make_submission();
        submission.resume_bytes = vec![];
        assert!(validate_submission(&submission).is_err());
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(String::new()), None);
        assert_eq!(none_if_empty("  ".to_string()), None);
        assert_eq!(none_if_empty("8 years".to_string()), Some("8 years".to_string()));
    }
}
