use super::{PerSeverity, Severity, percentage};
use crate::records::Batch;
use serde::Serialize;

/// Issue field holding the audit status.
pub const SCAN_STATUS_FIELD: &str = "scanStatus";

/// How many issues were looked at by an auditor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReviewTally {
    pub total: u64,
    pub reviewed: u64,
    pub rate_percent: f64,
}

impl ReviewTally {
    fn record(&mut self, reviewed: bool) {
        self.total += 1;
        if reviewed {
            self.reviewed += 1;
        }
    }

    fn finish(mut self) -> Self {
        self.rate_percent = percentage(self.reviewed, self.total);
        self
    }
}

/// Review progress per severity and overall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReviewRates {
    pub by_severity: PerSeverity<ReviewTally>,
    pub overall: ReviewTally,
}

/// Computes the share of issues whose status differs from `unreviewed_status`.
///
/// An issue without a status counts as unreviewed.
#[must_use]
pub fn compute_review_rates(issues: &Batch, unreviewed_status: &str) -> ReviewRates {
    let mut rates = ReviewRates::default();

    for issue in issues.records() {
        let status = issue.str_field(SCAN_STATUS_FIELD).present().unwrap_or(unreviewed_status);
        let reviewed = status != unreviewed_status;

        rates.by_severity.get_mut(Severity::of(issue)).record(reviewed);
        rates.overall.record(reviewed);
    }

    ReviewRates {
        by_severity: rates.by_severity.map(|_, tally| tally.finish()),
        overall: rates.overall.finish(),
    }
}
