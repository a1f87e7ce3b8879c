use super::{Severity, SeverityCounts};
use crate::records::{Batch, Sampling};
use serde::Serialize;

const LOG_TARGET: &str = "  severity";

/// Scales a count observed in a sample up to the population the sample was drawn from.
///
/// Scaling floors the result. An empty sample estimates zero, and a complete or
/// inconsistent sample leaves the count unchanged.
#[must_use]
pub fn extrapolate(count: u64, sampling: Sampling) -> u64 {
    match sampling {
        Sampling::Sampled { sample_size: 0, .. } | Sampling::Complete { sample_size: 0 } => 0,
        Sampling::Sampled { sample_size, total_count } => {
            let scaled = u128::from(count) * u128::from(total_count) / u128::from(sample_size);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        }
        Sampling::Complete { .. } | Sampling::Inconsistent { .. } => count,
    }
}

/// Issue counts per severity, as observed and as estimated for the full population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityDistribution {
    pub observed: SeverityCounts,

    /// Equal to `observed` unless `extrapolated` is set.
    pub estimated: SeverityCounts,

    pub sampling: Sampling,

    /// Whether `estimated` was scaled up from a sample.
    pub extrapolated: bool,
}

impl SeverityDistribution {
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        self.sampling.is_inconsistent()
    }
}

/// Counts every issue by severity bucket (`Unknown` included) and extrapolates each bucket
/// independently when the batch is a sample.
#[must_use]
pub fn compute_severity_distribution(issues: &Batch) -> SeverityDistribution {
    let mut observed = SeverityCounts::default();
    for issue in issues.records() {
        observed.increment(Severity::of(issue));
    }

    let sampling = issues.sampling();
    if let Sampling::Inconsistent { sample_size, total_count } = sampling {
        log::warn!(target: LOG_TARGET, "Batch holds {sample_size} issue(s) but reports a total of {total_count}; counts are not extrapolated");
    }

    let extrapolated = matches!(sampling, Sampling::Sampled { sample_size, .. } if sample_size > 0);
    let estimated = observed.map(|_, count| extrapolate(count, sampling));

    SeverityDistribution {
        observed,
        estimated,
        sampling,
        extrapolated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;
    use serde_json::{Value, json};

    fn issues(severities: &[Value], total_count: Option<u64>) -> Batch {
        let records = severities
            .iter()
            .map(|s| serde_json::from_value::<Record>(json!({ "severity": s })).unwrap())
            .collect();
        Batch::new(records, total_count)
    }

    #[test]
    fn test_extrapolate_floors() {
        let sampling = Sampling::Sampled { sample_size: 10, total_count: 25 };
        assert_eq!(extrapolate(3, sampling), 7);
        assert_eq!(extrapolate(4, sampling), 10);
        assert_eq!(extrapolate(0, sampling), 0);
    }

    #[test]
    fn test_extrapolate_identity_when_complete() {
        assert_eq!(extrapolate(3, Sampling::Complete { sample_size: 10 }), 3);
        assert_eq!(extrapolate(9, Sampling::Complete { sample_size: 0 }), 0);
    }

    #[test]
    fn test_extrapolate_empty_sample_is_zero() {
        assert_eq!(extrapolate(5, Sampling::Sampled { sample_size: 0, total_count: 100 }), 0);
    }

    #[test]
    fn test_extrapolate_inconsistent_passes_through() {
        assert_eq!(extrapolate(5, Sampling::Inconsistent { sample_size: 10, total_count: 4 }), 5);
    }

    #[test]
    fn test_extrapolate_large_values_do_not_overflow() {
        let sampling = Sampling::Sampled { sample_size: 2, total_count: u64::MAX };
        assert_eq!(extrapolate(1, sampling), u64::MAX / 2);
        assert_eq!(extrapolate(4, sampling), u64::MAX);
    }

    #[test]
    fn test_distribution_counts_every_bucket() {
        let batch = issues(&[json!("Critical"), json!(2.0), json!("High"), json!("bogus"), json!(null)], None);
        let dist = compute_severity_distribution(&batch);

        assert_eq!(dist.observed.critical, 1);
        assert_eq!(dist.observed.high, 2);
        assert_eq!(dist.observed.unknown, 2);
        assert_eq!(dist.observed.total(), 5);
        assert_eq!(dist.estimated, dist.observed);
        assert!(!dist.extrapolated);
    }

    #[test]
    fn test_distribution_extrapolates_each_bucket() {
        let batch = issues(&[json!(1.0), json!(1.0), json!(1.0), json!(4.0)], Some(10));
        let dist = compute_severity_distribution(&batch);

        assert!(dist.extrapolated);
        assert_eq!(dist.observed.critical, 3);
        assert_eq!(dist.estimated.critical, 7);
        assert_eq!(dist.estimated.low, 2);
        assert_eq!(dist.estimated.high, 0);
    }

    #[test]
    fn test_distribution_inconsistent_batch_is_flagged() {
        let batch = issues(&[json!("Low"), json!("Low"), json!("Low")], Some(1));
        let dist = compute_severity_distribution(&batch);

        assert!(dist.is_inconsistent());
        assert!(!dist.extrapolated);
        assert_eq!(dist.estimated.low, 3);
    }

    #[test]
    fn test_distribution_empty_sample_of_known_population() {
        let dist = compute_severity_distribution(&Batch::new(Vec::new(), Some(50)));
        assert!(!dist.extrapolated);
        assert_eq!(dist.estimated.total(), 0);
    }

    #[test]
    fn test_distribution_is_idempotent() {
        let batch = issues(&[json!("Medium"), json!(3.5)], Some(8));
        assert_eq!(compute_severity_distribution(&batch), compute_severity_distribution(&batch));
    }
}
