use super::{PerSeverity, Severity};
use crate::records::{Batch, FieldValue, Record, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::Serialize;

const LOG_TARGET: &str = "      mttr";

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// What a single record contributes to the remediation-time statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalOutcome {
    /// Elapsed days from start to end.
    Included(f64),

    /// Either timestamp is absent.
    MissingTimestamp,

    /// Either timestamp is present but not in a recognized encoding.
    Unparsable,

    /// The end precedes the start.
    Negative,
}

/// Measures the interval between two timestamp fields of a record.
#[must_use]
pub fn measure_interval(record: &Record, start_field: &str, end_field: &str) -> IntervalOutcome {
    let (start, end) = match (read_instant(record, start_field), read_instant(record, end_field)) {
        (FieldValue::Present(start), FieldValue::Present(end)) => (start, end),
        (FieldValue::Malformed, _) | (_, FieldValue::Malformed) => return IntervalOutcome::Unparsable,
        _ => return IntervalOutcome::MissingTimestamp,
    };

    let elapsed = end - start;
    if elapsed < chrono::TimeDelta::zero() {
        log::warn!(target: LOG_TARGET, "Ignoring record whose {end_field} ({end}) precedes its {start_field} ({start})");
        return IntervalOutcome::Negative;
    }

    #[expect(clippy::cast_precision_loss, reason = "acceptable for durations")]
    let days = elapsed.num_milliseconds() as f64 / MILLISECONDS_PER_DAY;
    IntervalOutcome::Included(days)
}

fn read_instant(record: &Record, field: &str) -> FieldValue<DateTime<Utc>> {
    record
        .str_field(field)
        .and_then(|text| parse_timestamp(text).map_or(FieldValue::Malformed, FieldValue::Present))
}

/// Summary statistics over a set of intervals, in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalStats {
    pub count: u64,
    pub mean_days: f64,
    pub p50_days: f64,
    pub p90_days: f64,
}

impl IntervalStats {
    /// Returns `None` when there are no intervals, so that "no data" never reads as zero days.
    #[must_use]
    pub fn from_days(mut days: Vec<f64>) -> Option<Self> {
        if days.is_empty() {
            return None;
        }

        days.sort_by(f64::total_cmp);

        #[expect(clippy::cast_precision_loss, reason = "acceptable for averages")]
        let mean_days = days.iter().sum::<f64>() / days.len() as f64;

        Some(Self {
            count: days.len() as u64,
            mean_days,
            p50_days: percentile(&days, 50.0),
            p90_days: percentile(&days, 90.0),
        })
    }
}

/// Counts of records left out of the statistics, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExcludedIntervals {
    pub missing_timestamp: u64,
    pub unparsable: u64,
    pub negative: u64,
}

impl ExcludedIntervals {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.missing_timestamp + self.unparsable + self.negative
    }
}

/// Mean time to remediate, per severity and across all issues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemediationTimes {
    pub by_severity: PerSeverity<Option<IntervalStats>>,
    pub overall: Option<IntervalStats>,
    pub excluded: ExcludedIntervals,
}

impl RemediationTimes {
    #[must_use]
    pub const fn included(&self) -> u64 {
        match &self.overall {
            Some(stats) => stats.count,
            None => 0,
        }
    }
}

/// Computes remediation-time statistics over a batch of remediated issues.
#[must_use]
pub fn compute_remediation_times(issues: &Batch, start_field: &str, end_field: &str) -> RemediationTimes {
    let mut by_severity: PerSeverity<Vec<f64>> = PerSeverity::default();
    let mut overall = Vec::new();
    let mut excluded = ExcludedIntervals::default();

    for issue in issues.records() {
        match measure_interval(issue, start_field, end_field) {
            IntervalOutcome::Included(days) => {
                by_severity.get_mut(Severity::of(issue)).push(days);
                overall.push(days);
            }
            IntervalOutcome::MissingTimestamp => excluded.missing_timestamp += 1,
            IntervalOutcome::Unparsable => excluded.unparsable += 1,
            IntervalOutcome::Negative => excluded.negative += 1,
        }
    }

    if excluded.total() > 0 {
        log::debug!(target: LOG_TARGET, "Excluded {} record(s) from remediation times: {excluded:?}", excluded.total());
    }

    RemediationTimes {
        by_severity: by_severity.map(|_, days| IntervalStats::from_days(days)),
        overall: IntervalStats::from_days(overall),
        excluded,
    }
}

/// Nearest-rank percentile of already sorted data.
fn percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    #[expect(clippy::cast_possible_truncation, reason = "index calculation")]
    #[expect(clippy::cast_sign_loss, reason = "value is clamped to non-negative range")]
    #[expect(clippy::cast_precision_loss, reason = "index fits in usize")]
    let idx = (percentile / 100.0 * (sorted_data.len() - 1) as f64)
        .round()
        .clamp(0.0, (sorted_data.len() - 1) as f64) as usize;
    sorted_data[idx]
}
