//! Candidate/job matching — the external generative-AI capability behind a
//! pluggable trait.
//!
//! Two calls are made per submission: resume profile extraction and match
//! scoring. Both are enrichments, not gates: the submit workflow survives
//! either call failing. `AppState` holds an `Arc<dyn MatchScorer>` so tests
//! can substitute a canned backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{
    MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM, PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM,
};
use crate::models::job::JobRow;

pub mod prompts;

/// Structured candidate attributes extracted from resume text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Result of a match scoring call. `score` is kept as reported by the
/// capability; the caller rounds it for storage and does not clamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl MatchAnalysis {
    /// The match score rounded to the nearest integer, as stored on the
    /// application row.
    pub fn rounded_score(&self) -> i32 {
        self.score.round() as i32
    }

    /// The `ai_analysis` payload persisted alongside the score.
    pub fn to_stored_json(&self) -> Value {
        json!({
            "score": self.rounded_score(),
            "matched_skills": self.matched_skills,
            "missing_skills": self.missing_skills,
            "reasoning": self.reasoning,
        })
    }
}

/// The matching capability. Implement this to swap backends without touching
/// the submit workflow.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Extracts skills/experience/education/links from resume plain text.
    async fn extract_profile(&self, resume_text: &str) -> Result<ResumeProfile, AppError>;

    /// Scores candidate attributes against a job's requirements and
    /// description.
    async fn score_match(
        &self,
        skills: &[String],
        experience: &str,
        job: &JobRow,
    ) -> Result<MatchAnalysis, AppError>;
}

/// Production backend: both calls routed through the shared LLM client.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn extract_profile(&self, resume_text: &str) -> Result<ResumeProfile, AppError> {
        let prompt = PROFILE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        self.0
            .call_json::<ResumeProfile>(&prompt, PROFILE_SYSTEM)
            .await
            .map_err(|e| AppError::Ai(format!("Resume profile extraction failed: {e}")))
    }

    async fn score_match(
        &self,
        skills: &[String],
        experience: &str,
        job: &JobRow,
    ) -> Result<MatchAnalysis, AppError> {
        let prompt = build_match_prompt(skills, experience, job);
        self.0
            .call_json::<MatchAnalysis>(&prompt, MATCH_SYSTEM)
            .await
            .map_err(|e| AppError::Ai(format!("Match scoring failed: {e}")))
    }
}

fn build_match_prompt(skills: &[String], experience: &str, job: &JobRow) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{skills}", &bullet_list(skills))
        .replace(
            "{experience}",
            if experience.is_empty() {
                "(none provided)"
            } else {
                experience
            },
        )
        .replace("{requirements}", &bullet_list(&job.requirements))
        .replace("{description}", &job.description)
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_job(requirements: Vec<&str>, description: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            department: "Engineering".to_string(),
            location: "Remote".to_string(),
            employment_type: "full-time".to_string(),
            description: description.to_string(),
            requirements: requirements.into_iter().map(String::from).collect(),
            responsibilities: vec![],
            salary_range: None,
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rounded_score_rounds_to_nearest() {
        let analysis = MatchAnalysis {
            score: 84.5,
            matched_skills: vec![],
            missing_skills: vec![],
            reasoning: String::new(),
        };
        assert_eq!(analysis.rounded_score(), 85);

        let analysis = MatchAnalysis {
            score: 84.4,
            ..analysis
        };
        assert_eq!(analysis.rounded_score(), 84);
    }

    #[test]
    fn test_out_of_range_score_passes_through_unclamped() {
        // The capability promises 0-100 but the caller only rounds.
        let analysis = MatchAnalysis {
            score: 104.6,
            matched_skills: vec![],
            missing_skills: vec![],
            reasoning: String::new(),
        };
        assert_eq!(analysis.rounded_score(), 105);
    }

    #[test]
    fn test_stored_json_shape() {
        let analysis = MatchAnalysis {
            score: 72.0,
            matched_skills: vec!["Rust".to_string()],
            missing_skills: vec!["Kubernetes".to_string()],
            reasoning: "Solid systems background, no orchestration evidence.".to_string(),
        };
        let value = analysis.to_stored_json();
        assert_eq!(value["score"], 72);
        assert_eq!(value["matched_skills"][0], "Rust");
        assert_eq!(value["missing_skills"][0], "Kubernetes");
        assert!(value["reasoning"].as_str().unwrap().contains("systems"));
    }

    #[test]
    fn test_analysis_deserializes_with_missing_optional_fields() {
        let analysis: MatchAnalysis = serde_json::from_str("{\"score\": 55}").unwrap();
        assert_eq!(analysis.rounded_score(), 55);
        assert!(analysis.matched_skills.is_empty());
        assert!(analysis.reasoning.is_empty());
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: ResumeProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_match_prompt_includes_candidate_and_job_sections() {
        let job = make_job(vec!["Rust", "PostgreSQL"], "Build the core platform.");
        let skills = vec!["Rust".to_string(), "Go".to_string()];
        let prompt = build_match_prompt(&skills, "8 years backend work", &job);
        assert!(prompt.contains("- Rust"));
        assert!(prompt.contains("- PostgreSQL"));
        assert!(prompt.contains("8 years backend work"));
        assert!(prompt.contains("Build the core platform."));
    }

    #[test]
    fn test_match_prompt_handles_empty_inputs() {
        let job = make_job(vec![], "Short description.");
        let prompt = build_match_prompt(&[], "", &job);
        assert!(prompt.contains("(none)"));
        assert!(prompt.contains("(none provided)"));
    }
}
