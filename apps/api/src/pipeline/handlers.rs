//! Axum route handlers for jobs, candidates, applications, interviews, and
//! the aggregate views.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::candidate::CandidateRow;
use crate::models::interview::InterviewRow;
use crate::models::job::{JobRow, JobStatus};
use crate::pipeline::status::transition_status;
use crate::pipeline::submit::{submit_application, SubmitResponse, Submission};
use crate::pipeline::views::{
    bucket_interviews, group_into_columns, load_stats, rank_candidates, InterviewSchedule,
    PipelineColumn, RankedCandidate, Stats,
};
use crate::state::AppState;
use crate::store::applications::ApplicationDetailRow;
use crate::store::interviews::{InterviewUpdate, NewInterview};
use crate::store::jobs::JobInput;
use crate::store::{applications, candidates, interviews, jobs};

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let job = jobs::create_job(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(jobs::list_jobs(&state.db, params.status).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = jobs::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobRow>, AppError> {
    let job = jobs::update_job(&state.db, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications — multipart submit: `name`, `email`, `phone?`,
/// `job_id`, `resume` file.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let submission = parse_submission(multipart).await?;
    let response = submit_application(&state, submission).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn parse_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut name = None;
    let mut email = None;
    let mut phone = None;
    let mut job_id = None;
    let mut resume_filename = None;
    let mut resume_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(read_text(field).await?),
            Some("email") => email = Some(read_text(field).await?),
            Some("phone") => phone = Some(read_text(field).await?),
            Some("job_id") => {
                let raw = read_text(field).await?;
                let id = raw
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid job id")))?;
                job_id = Some(id);
            }
            Some("resume") => {
                resume_filename = Some(field.file_name().unwrap_or("resume").to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    Ok(Submission {
        name: name
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?,
        email: email
            .map(|s| s.trim().to_lowercase())
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?,
        phone: phone.filter(|p| !p.trim().is_empty()),
        job_id: job_id.ok_or_else(|| AppError::Validation("job_id is required".to_string()))?,
        resume_filename: resume_filename
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?,
        resume_bytes: resume_bytes
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form field: {e}")))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/applications
pub async fn handle_recent_applications(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<ApplicationDetailRow>>, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    Ok(Json(applications::list_recent(&state.db, limit).await?))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let application = applications::get_application(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: ApplicationStatus,
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_transition_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let application = transition_status(&state.db, id, req.status).await?;
    Ok(Json(application))
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates — ranked by best match score.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedCandidate>>, AppError> {
    let candidate_rows = candidates::list_candidates(&state.db).await?;
    let application_rows = applications::list_detailed(&state.db).await?;
    Ok(Json(rank_candidates(candidate_rows, application_rows)))
}

#[derive(Debug, Serialize)]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: CandidateRow,
    pub applications: Vec<ApplicationDetailRow>,
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let candidate = candidates::get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    let applications = applications::list_detailed_for_candidate(&state.db, id).await?;
    Ok(Json(CandidateDetailResponse {
        candidate,
        applications,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Interviews
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(new): Json<NewInterview>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    // Scheduling never mutates the application; it only has to exist.
    applications::get_application(&state.db, new.application_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Application {} not found", new.application_id))
        })?;

    let interview = interviews::create_interview(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<InterviewSchedule>, AppError> {
    let rows = interviews::list_detailed(&state.db).await?;
    Ok(Json(bucket_interviews(rows, Utc::now())))
}

/// PATCH /api/v1/interviews/:id
pub async fn handle_update_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<InterviewUpdate>,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = interviews::update_interview(&state.db, id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    Ok(Json(interview))
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate views
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/pipeline
pub async fn handle_pipeline(
    State(state): State<AppState>,
) -> Result<Json<Vec<PipelineColumn>>, AppError> {
    let rows = applications::list_detailed(&state.db).await?;
    Ok(Json(group_into_columns(rows)))
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    Ok(Json(load_stats(&state.db).await?))
}
