//! The metrics aggregation engine
//!
//! Every aggregation in this module is a pure fold over one [`Batch`](crate::records::Batch)
//! (scan coverage takes one artifact batch per project version). Aggregations never depend
//! on one another's output and can run in any order, or concurrently on independent batches.
//!
//! # Classification
//!
//! Raw field values are mapped onto small fixed enums: [`Severity`], [`ScanType`] and
//! [`ComplianceBucket`]. Each classifier is total, so every record lands in exactly one bucket.
//!
//! # Data Quality
//!
//! Records with missing or malformed fields still take part: they fall into an `Unknown`
//! or `Unassessed` bucket, or are counted as excluded, and the summary says how many.
//! Sampled batches are scaled up with [`extrapolate`]; a batch that reports a population
//! smaller than itself is flagged instead of corrected.

mod compliance;
mod coverage;
mod distribution;
mod percent;
mod ranking;
mod recurrence;
mod remediation;
mod review;
mod scan_type;
mod severity;
mod star_rating;

pub use compliance::{ComplianceBucket, ComplianceSummary, classify_rating, compute_compliance, security_rating};
pub use coverage::{PerScanType, ScanCoverage, compute_scan_coverage};
pub use distribution::{SeverityDistribution, compute_severity_distribution, extrapolate};
pub use percent::percentage;
pub use ranking::{CategoryRanking, DEFAULT_CATEGORY, RankedGroup, rank_categories};
pub use recurrence::{RecurrenceCandidate, find_recurrence_candidates};
pub use remediation::{ExcludedIntervals, IntervalOutcome, IntervalStats, RemediationTimes, compute_remediation_times, measure_interval};
pub use review::{ReviewRates, ReviewTally, compute_review_rates};
pub use scan_type::ScanType;
pub use severity::{PerSeverity, Severity, SeverityCounts};
pub use star_rating::{StarRating, derive_star_rating};
