// All LLM prompt constants for the matching module.

/// System prompt for resume profile extraction — enforces JSON-only output.
pub const PROFILE_SYSTEM: &str =
    "You are an expert technical recruiter parsing resumes. \
    Extract structured candidate information from resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Profile extraction prompt template. Replace `{resume_text}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Extract the candidate's profile from the resume text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["Rust", "PostgreSQL", "Kubernetes"],
  "experience": "Concise summary of work history: roles, companies, years",
  "education": "Concise summary of degrees and institutions",
  "links": ["https://github.com/janedoe", "https://linkedin.com/in/janedoe"]
}

Rules:
- skills: concrete technologies, languages, frameworks, and tools only. No soft skills.
- experience: 2-4 sentences, most recent roles first. Empty string if none found.
- education: 1-2 sentences. Empty string if none found.
- links: only URLs that actually appear in the resume (GitHub, LinkedIn, portfolio).

RESUME TEXT:
{resume_text}"#;

/// System prompt for match scoring — enforces JSON-only output.
pub const MATCH_SYSTEM: &str =
    "You are an expert technical recruiter evaluating candidate-to-job fit. \
    Score how well a candidate matches a job's requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Match scoring prompt template. Replace `{skills}`, `{experience}`,
/// `{requirements}`, and `{description}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Evaluate how well this candidate matches the job below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 85,
  "matched_skills": ["Rust", "PostgreSQL"],
  "missing_skills": ["Kubernetes"],
  "reasoning": "2-3 sentences explaining the score"
}

Rules:
- score: integer 0-100. 90+ means the candidate covers essentially every requirement;
  below 40 means major gaps on the core requirements.
- matched_skills: the subset of the job requirements the candidate demonstrably covers.
- missing_skills: the job requirements with no evidence in the candidate's profile.
- Weight hard requirements over nice-to-haves mentioned in the description.

CANDIDATE SKILLS:
{skills}

CANDIDATE EXPERIENCE:
{experience}

JOB REQUIREMENTS:
{requirements}

JOB DESCRIPTION:
{description}"#;
