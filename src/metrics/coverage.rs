use super::scan_type::SCAN_TYPE_FIELD;
use super::{ScanType, percentage};
use crate::records::Batch;
use serde::Serialize;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

/// Path from an artifact to its embedded scans.
const SCANS_PATH: &[&str] = &["embed", "scans"];

/// One value per scan type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerScanType<T> {
    #[serde(rename = "SAST")]
    pub sast: T,

    #[serde(rename = "DAST")]
    pub dast: T,

    #[serde(rename = "SCA")]
    pub sca: T,

    pub other: T,
}

impl<T> PerScanType<T> {
    #[must_use]
    pub const fn get(&self, scan_type: ScanType) -> &T {
        match scan_type {
            ScanType::Sast => &self.sast,
            ScanType::Dast => &self.dast,
            ScanType::Sca => &self.sca,
            ScanType::Other => &self.other,
        }
    }

    pub const fn get_mut(&mut self, scan_type: ScanType) -> &mut T {
        match scan_type {
            ScanType::Sast => &mut self.sast,
            ScanType::Dast => &mut self.dast,
            ScanType::Sca => &mut self.sca,
            ScanType::Other => &mut self.other,
        }
    }
}

/// How many versions ran each kind of scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScanCoverage {
    /// Number of versions checked.
    pub versions: u64,

    /// Versions with at least one scan of each type.
    pub counts: PerScanType<u64>,

    /// `counts` as a percentage of `versions`.
    pub percentages: PerScanType<f64>,
}

/// Computes scan-type coverage from one artifact batch per project version.
///
/// Each scan type is counted at most once per version, however many artifacts or scans
/// of that type the version holds. A scan without a recognized type counts as `Other`.
#[must_use]
pub fn compute_scan_coverage<'a>(artifacts_per_version: impl IntoIterator<Item = &'a Batch>) -> ScanCoverage {
    let mut coverage = ScanCoverage::default();

    for artifacts in artifacts_per_version {
        let seen: BTreeSet<ScanType> = artifacts
            .records()
            .iter()
            .flat_map(|artifact| artifact.nested(SCANS_PATH))
            .map(|scan| ScanType::classify(scan.str_field(SCAN_TYPE_FIELD).present()))
            .collect();

        for scan_type in seen {
            *coverage.counts.get_mut(scan_type) += 1;
        }
        coverage.versions += 1;
    }

    for scan_type in ScanType::iter() {
        *coverage.percentages.get_mut(scan_type) = percentage(*coverage.counts.get(scan_type), coverage.versions);
    }

    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;
    use serde_json::{Value, json};

    fn artifact(scan_types: &[Value]) -> Record {
        let scans: Vec<_> = scan_types.iter().map(|t| json!({ "scanType": t })).collect();
        serde_json::from_value(json!({ "embed": { "scans": scans } })).unwrap()
    }

    fn version(artifacts: Vec<Record>) -> Batch {
        artifacts.into_iter().collect()
    }

    #[test]
    fn test_coverage_dedupes_within_version() {
        let versions = [
            version(vec![artifact(&[json!("SAST"), json!("SAST")]), artifact(&[json!("SAST"), json!("SCA")])]),
            version(vec![artifact(&[json!("DAST")])]),
        ];

        let coverage = compute_scan_coverage(&versions);
        assert_eq!(coverage.versions, 2);
        assert_eq!(coverage.counts.sast, 1);
        assert_eq!(coverage.counts.dast, 1);
        assert_eq!(coverage.counts.sca, 1);
        assert_eq!(coverage.counts.other, 0);
        assert!((coverage.percentages.sast - 50.0).abs() < f64::EPSILON);
        assert!((coverage.percentages.dast - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_unknown_types_count_once_as_other() {
        let versions = [version(vec![artifact(&[json!("WEBINSPECT"), json!(null), json!("sast")])])];

        let coverage = compute_scan_coverage(&versions);
        assert_eq!(coverage.counts.other, 1);
        assert_eq!(coverage.counts.sast, 0);
        assert!((coverage.percentages.other - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_version_without_scans_counts_in_denominator() {
        let versions = [version(vec![artifact(&[json!("SCA")])]), version(Vec::new()), version(vec![Record::default()])];

        let coverage = compute_scan_coverage(&versions);
        assert_eq!(coverage.versions, 3);
        assert_eq!(coverage.counts.sca, 1);
        assert!((coverage.percentages.sca - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_no_versions() {
        let coverage = compute_scan_coverage(core::iter::empty());
        assert_eq!(coverage, ScanCoverage::default());
    }

    #[test]
    fn test_coverage_is_idempotent() {
        let versions = [version(vec![artifact(&[json!("SAST"), json!("DAST")])])];
        assert_eq!(compute_scan_coverage(&versions), compute_scan_coverage(&versions));
    }
}
