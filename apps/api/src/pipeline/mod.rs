// Application lifecycle: the submit-with-score workflow, the status
// transition workflow, and the read-only aggregate views.
// All AI calls go through the MatchScorer seam — no direct LLM calls here.

pub mod handlers;
pub mod status;
pub mod submit;
pub mod views;
