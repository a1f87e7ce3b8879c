use super::percentage;
use crate::records::{Batch, FieldValue, Record};
use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

const LOG_TARGET: &str = "compliance";

/// Version field holding the list of performance indicators.
pub const PERFORMANCE_INDICATORS_FIELD: &str = "performanceIndicators";

const INDICATOR_NAME_FIELD: &str = "name";
const INDICATOR_VALUE_FIELD: &str = "value";

/// Ratings at or above this always pass.
pub const PASS_THRESHOLD: f64 = 4.5;

/// Ratings at or below this always fail.
pub const FAIL_THRESHOLD: f64 = 1.5;

/// Between the two thresholds, ratings at or above this pass.
pub const MIDPOINT_THRESHOLD: f64 = 3.0;

/// Compliance outcome of a single project version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, IntoStaticStr, Serialize)]
pub enum ComplianceBucket {
    Pass,
    Fail,
    Unassessed,
}

/// Classifies a security rating on the 0-5 scale.
///
/// Total over its input: no rating is `Unassessed`, and every number lands in `Pass` or `Fail`.
#[must_use]
pub fn classify_rating(rating: Option<f64>) -> ComplianceBucket {
    let Some(rating) = rating else {
        return ComplianceBucket::Unassessed;
    };

    if rating >= PASS_THRESHOLD {
        ComplianceBucket::Pass
    } else if rating <= FAIL_THRESHOLD {
        ComplianceBucket::Fail
    } else if rating >= MIDPOINT_THRESHOLD {
        ComplianceBucket::Pass
    } else {
        ComplianceBucket::Fail
    }
}

/// Reads the security rating of a version from its first performance indicator whose name
/// contains `indicator`.
#[must_use]
pub fn security_rating(version: &Record, indicator: &str) -> FieldValue<f64> {
    version
        .nested(&[PERFORMANCE_INDICATORS_FIELD])
        .find(|entry| entry.str_field(INDICATOR_NAME_FIELD).present().is_some_and(|name| name.contains(indicator)))
        .map_or(FieldValue::Missing, |entry| entry.f64_field(INDICATOR_VALUE_FIELD))
}

/// Compliance counts over a batch of project versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComplianceSummary {
    pub pass: u64,
    pub fail: u64,
    pub unassessed: u64,
    pub total: u64,

    /// Versions whose rating was present but not a number.
    pub anomalies: u64,

    pub pass_percent: f64,
    pub fail_percent: f64,
    pub unassessed_percent: f64,
}

impl ComplianceSummary {
    #[must_use]
    pub const fn count(&self, bucket: ComplianceBucket) -> u64 {
        match bucket {
            ComplianceBucket::Pass => self.pass,
            ComplianceBucket::Fail => self.fail,
            ComplianceBucket::Unassessed => self.unassessed,
        }
    }
}

/// Classifies every version in the batch and summarizes the buckets.
#[must_use]
pub fn compute_compliance(versions: &Batch, indicator: &str) -> ComplianceSummary {
    let mut summary = ComplianceSummary::default();

    for version in versions.records() {
        let rating = match security_rating(version, indicator) {
            FieldValue::Present(rating) => Some(rating),
            FieldValue::Missing => None,
            FieldValue::Malformed => {
                log::debug!(target: LOG_TARGET, "Version {:?} has a non-numeric {indicator} rating", version.id_field("id"));
                summary.anomalies += 1;
                None
            }
        };

        match classify_rating(rating) {
            ComplianceBucket::Pass => summary.pass += 1,
            ComplianceBucket::Fail => summary.fail += 1,
            ComplianceBucket::Unassessed => summary.unassessed += 1,
        }
        summary.total += 1;
    }

    summary.pass_percent = percentage(summary.pass, summary.total);
    summary.fail_percent = percentage(summary.fail, summary.total);
    summary.unassessed_percent = percentage(summary.unassessed, summary.total);
    summary
}
