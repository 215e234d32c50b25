//! Rejection wording shared by the ranking pipeline and the rejection email.

use crate::models::candidate::CandidateAnalysis;

/// Candidates scoring below this are rejected during provisional classification.
pub const MIN_MATCH_SCORE: f64 = 50.0;

const OPENING: &str = "Thank you for your interest in the position. After careful consideration, \
    we regret to inform you that you have not been shortlisted.";

pub const EMAIL_SUBJECT: &str = "Resume Application Update";

/// Reason attached to every sub-threshold candidate before shortlisting.
pub fn below_threshold_reason() -> String {
    format!("{OPENING} Reasons for rejection include: Your match score was below 50%.")
}

/// Reason attached to rejected candidates that can be contacted.
pub fn detailed_reason(weak_points: &str, match_score: f64) -> String {
    format!(
        "{OPENING} Reasons for rejection include: {weak_points}. Your match score was {match_score}%."
    )
}

/// Body of the rejection email for one candidate.
pub fn rejection_letter(name: &str, candidate: &CandidateAnalysis) -> String {
    format!(
        "Dear {name},\n\n{}",
        detailed_reason(&candidate.weak_points, candidate.match_score)
    )
}
