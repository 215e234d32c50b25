// Resume screening: per-resume analysis, salary estimation, and the ranking
// pipeline that shortlists candidates and drafts rejections.
// All LLM calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod rejection;
pub mod salary;
