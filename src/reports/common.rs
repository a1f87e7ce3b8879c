//! Common formatting shared across report generators.

use crate::metrics::IntervalStats;
use crate::records::Sampling;

/// Placeholder shown where a metric has no data.
pub const NO_DATA: &str = "n/a";

/// Format a percentage with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a duration in days with one decimal place.
pub fn format_days(days: f64) -> String {
    format!("{days:.1} days")
}

/// Format interval statistics on one line, or `n/a` when nothing was measured.
pub fn format_interval_stats(stats: Option<&IntervalStats>) -> String {
    stats.map_or_else(
        || NO_DATA.to_string(),
        |s| {
            format!(
                "{} (p50 {:.1}, p90 {:.1}, n={})",
                format_days(s.mean_days),
                s.p50_days,
                s.p90_days,
                s.count
            )
        },
    )
}

/// Format a count that may have been scaled up from a sample.
///
/// Estimates are marked with `~` and followed by the observed figure.
pub fn format_estimate(observed: u64, estimated: u64, extrapolated: bool) -> String {
    if extrapolated {
        format!("~{estimated} ({observed} observed)")
    } else {
        observed.to_string()
    }
}

/// Describe how a batch relates to its population.
pub fn format_sampling(sampling: Sampling) -> String {
    match sampling {
        Sampling::Complete { sample_size } => format!("complete ({sample_size} issues)"),
        Sampling::Sampled { sample_size, total_count } => {
            format!("{sample_size} of {total_count} issues sampled, counts are estimates")
        }
        Sampling::Inconsistent { sample_size, total_count } => {
            format!("inconsistent: {sample_size} issues held but total reported as {total_count}")
        }
    }
}

/// Render a 1 to 5 star rating as filled and empty stars.
pub fn format_stars(stars: u8) -> String {
    let filled = usize::from(stars.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
