use crate::metrics::{
    CategoryRanking, ComplianceSummary, RecurrenceCandidate, RemediationTimes, ReviewRates, ScanCoverage, SeverityDistribution, StarRating,
};
use serde::Serialize;

/// Every metric computed for one dashboard run.
///
/// A metric is `None` when its input was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_distribution: Option<SeverityDistribution>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_coverage: Option<ScanCoverage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_times: Option<RemediationTimes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_categories: Option<CategoryRanking>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<StarRating>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_rates: Option<ReviewRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_candidates: Option<Vec<RecurrenceCandidate>>,
}
