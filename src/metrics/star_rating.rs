use super::Severity;
use crate::records::Batch;
use serde::Serialize;

/// Rating given when no issue carries a named severity.
pub const BEST_RATING: u8 = 5;

/// A 1 to 5 star rating driven by the worst severity present, where 5 is best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub stars: u8,
    pub reason: &'static str,
    pub worst: Option<Severity>,
}

impl StarRating {
    /// Rating for a given worst severity; `None` (or `Unknown`) means no severe issue.
    #[must_use]
    pub const fn for_worst(worst: Option<Severity>) -> Self {
        let (stars, reason, worst) = match worst {
            Some(Severity::Critical) => (1, "Critical issue present", worst),
            Some(Severity::High) => (2, "High issue present", worst),
            Some(Severity::Medium) => (3, "Medium issue present", worst),
            Some(Severity::Low) => (4, "Low issues only", worst),
            Some(Severity::Unknown) | None => (BEST_RATING, "No severe issues", None),
        };

        Self { stars, reason, worst }
    }
}

/// Derives the star rating of a batch of issues.
///
/// Labels and numeric codes may be mixed; a single issue of a given severity is enough
/// to cap the rating, however many milder issues there are.
#[must_use]
pub fn derive_star_rating(issues: &Batch) -> StarRating {
    if issues.is_empty() {
        return StarRating {
            reason: "No issues",
            ..StarRating::for_worst(None)
        };
    }

    let worst = issues.records().iter().map(Severity::of).filter(|s| s.is_named()).min();
    StarRating::for_worst(worst)
}
