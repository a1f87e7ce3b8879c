use super::{Dashboard, common};
use crate::Result;
use crate::metrics::{
    CategoryRanking, ComplianceBucket, ComplianceSummary, RecurrenceCandidate, RemediationTimes, ReviewRates, ScanCoverage, ScanType, Severity,
    SeverityDistribution, StarRating,
};
use core::fmt::Write;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use terminal_size::{Width, terminal_size};

/// Upper bound on the width of section rules.
const MAX_RULE_WIDTH: usize = 60;

pub fn generate<W: Write>(dashboard: &Dashboard, use_colors: bool, writer: &mut W) -> Result<()> {
    let mut out = Sections {
        writer,
        use_colors,
        first: true,
    };

    if let Some(compliance) = &dashboard.compliance {
        out.compliance(compliance)?;
    }

    if let Some(distribution) = &dashboard.severity_distribution {
        out.severity_distribution(distribution)?;
    }

    if let Some(coverage) = &dashboard.scan_coverage {
        out.scan_coverage(coverage)?;
    }

    if let Some(times) = &dashboard.remediation_times {
        out.remediation_times(times)?;
    }

    if let Some(ranking) = &dashboard.top_categories {
        out.top_categories(ranking)?;
    }

    if let Some(rating) = &dashboard.star_rating {
        out.star_rating(rating)?;
    }

    if let Some(rates) = &dashboard.review_rates {
        out.review_rates(rates)?;
    }

    if let Some(candidates) = &dashboard.recurrence_candidates {
        out.recurrence(candidates)?;
    }

    Ok(())
}

struct Sections<'a, W: Write> {
    writer: &'a mut W,
    use_colors: bool,
    first: bool,
}

impl<W: Write> Sections<'_, W> {
    fn header(&mut self, title: &str) -> Result<()> {
        if !self.first {
            writeln!(self.writer)?;
        }
        self.first = false;

        if self.use_colors {
            writeln!(self.writer, "{}", title.bold())?;
        } else {
            writeln!(self.writer, "{title}")?;
        }

        let width = get_terminal_width().min(MAX_RULE_WIDTH).max(title.chars().count());
        writeln!(self.writer, "{}", "─".repeat(width))?;
        Ok(())
    }

    /// Write label/value rows with the labels padded to a common width.
    fn rows(&mut self, rows: &[(String, String)]) -> Result<()> {
        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        for (label, value) in rows {
            writeln!(self.writer, "  {label:<width$} : {value}")?;
        }
        Ok(())
    }

    fn compliance(&mut self, summary: &ComplianceSummary) -> Result<()> {
        self.header("Compliance")?;

        let mut rows: Vec<(String, String)> = ComplianceBucket::iter()
            .map(|bucket| {
                let count = summary.count(bucket);
                let percent = match bucket {
                    ComplianceBucket::Pass => summary.pass_percent,
                    ComplianceBucket::Fail => summary.fail_percent,
                    ComplianceBucket::Unassessed => summary.unassessed_percent,
                };
                let value = format!("{count} ({})", common::format_percent(percent));
                (bucket.to_string(), self.paint_bucket(bucket, value))
            })
            .collect();

        rows.push(("Versions".to_string(), summary.total.to_string()));
        if summary.anomalies > 0 {
            rows.push(("Unreadable ratings".to_string(), summary.anomalies.to_string()));
        }

        self.rows(&rows)
    }

    fn severity_distribution(&mut self, distribution: &SeverityDistribution) -> Result<()> {
        self.header("Severity Distribution")?;

        let mut rows: Vec<(String, String)> = Severity::iter()
            .map(|severity| {
                let value = common::format_estimate(
                    *distribution.observed.get(severity),
                    *distribution.estimated.get(severity),
                    distribution.extrapolated,
                );
                (severity.to_string(), value)
            })
            .collect();

        let sampling = common::format_sampling(distribution.sampling);
        let sampling = if distribution.is_inconsistent() { self.paint_warning(sampling) } else { sampling };
        rows.push(("Sampling".to_string(), sampling));

        self.rows(&rows)
    }

    fn scan_coverage(&mut self, coverage: &ScanCoverage) -> Result<()> {
        self.header("Scan Coverage")?;

        let rows: Vec<(String, String)> = ScanType::iter()
            .map(|scan_type| {
                let value = format!(
                    "{} of {} versions ({})",
                    coverage.counts.get(scan_type),
                    coverage.versions,
                    common::format_percent(*coverage.percentages.get(scan_type))
                );
                (scan_type.to_string(), value)
            })
            .collect();

        self.rows(&rows)
    }

    fn remediation_times(&mut self, times: &RemediationTimes) -> Result<()> {
        self.header("Mean Time To Remediate")?;

        let mut rows: Vec<(String, String)> = Severity::named()
            .map(|severity| (severity.to_string(), common::format_interval_stats(times.by_severity.get(severity).as_ref())))
            .collect();

        if times.by_severity.unknown.is_some() {
            rows.push((
                Severity::Unknown.to_string(),
                common::format_interval_stats(times.by_severity.unknown.as_ref()),
            ));
        }

        rows.push(("All".to_string(), common::format_interval_stats(times.overall.as_ref())));

        if times.excluded.total() > 0 {
            let excluded = format!(
                "{} missing, {} unparsable, {} negative",
                times.excluded.missing_timestamp, times.excluded.unparsable, times.excluded.negative
            );
            rows.push(("Excluded".to_string(), self.paint_warning(excluded)));
        }

        self.rows(&rows)
    }

    fn top_categories(&mut self, ranking: &CategoryRanking) -> Result<()> {
        self.header("Top Categories")?;

        if ranking.groups.is_empty() {
            writeln!(self.writer, "  {}", common::NO_DATA)?;
            return Ok(());
        }

        let rows: Vec<(String, String)> = ranking
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let tallies = Severity::named()
                    .map(|severity| format!("{severity} {}", group.severities.get(severity)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let value = format!("{} ({tallies}) in {} version(s)", group.total, group.version_count);
                (format!("{}. {}", index + 1, group.category), value)
            })
            .collect();

        self.rows(&rows)?;

        writeln!(
            self.writer,
            "  {} of {} categories shown, {} issue(s) processed",
            ranking.groups.len(),
            ranking.distinct_categories,
            ranking.processed
        )?;

        if ranking.remainder_total > 0 {
            writeln!(self.writer, "  {} issue(s) in other categories", ranking.remainder_total)?;
        }
        Ok(())
    }

    fn star_rating(&mut self, rating: &StarRating) -> Result<()> {
        self.header("Star Rating")?;

        let stars = common::format_stars(rating.stars);
        let stars = if self.use_colors {
            match rating.stars {
                1 | 2 => stars.red().to_string(),
                3 => stars.yellow().to_string(),
                _ => stars.green().to_string(),
            }
        } else {
            stars
        };

        writeln!(self.writer, "  {stars} {}/5 : {}", rating.stars, rating.reason)?;
        Ok(())
    }

    fn review_rates(&mut self, rates: &ReviewRates) -> Result<()> {
        self.header("Review Rate")?;

        let mut rows: Vec<(String, String)> = Severity::named()
            .map(|severity| {
                let tally = rates.by_severity.get(severity);
                let value = format!("{} of {} ({})", tally.reviewed, tally.total, common::format_percent(tally.rate_percent));
                (severity.to_string(), value)
            })
            .collect();

        let overall = &rates.overall;
        rows.push((
            "Overall".to_string(),
            format!("{} of {} ({})", overall.reviewed, overall.total, common::format_percent(overall.rate_percent)),
        ));

        self.rows(&rows)
    }

    fn recurrence(&mut self, candidates: &[RecurrenceCandidate]) -> Result<()> {
        self.header("Recurrence Candidates")?;

        if candidates.is_empty() {
            writeln!(self.writer, "  none")?;
            return Ok(());
        }

        let rows: Vec<(String, String)> = candidates
            .iter()
            .map(|c| {
                (
                    format!("version {}, {}", c.version_id, c.category),
                    format!("{} open, {} removed", c.open, c.removed),
                )
            })
            .collect();

        self.rows(&rows)
    }

    fn paint_bucket(&self, bucket: ComplianceBucket, text: String) -> String {
        if !self.use_colors {
            return text;
        }

        match bucket {
            ComplianceBucket::Pass => text.green().to_string(),
            ComplianceBucket::Fail => text.red().to_string(),
            ComplianceBucket::Unassessed => text.dimmed().to_string(),
        }
    }

    fn paint_warning(&self, text: String) -> String {
        if self.use_colors { text.yellow().to_string() } else { text }
    }
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| usize::from(w))
}
