// Typed CRUD over the four entity tables. Aggregate projections live in
// `pipeline::views` and are recomputed from these rows on every request.

pub mod applications;
pub mod candidates;
pub mod interviews;
pub mod jobs;
