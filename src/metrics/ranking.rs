use super::{Severity, SeverityCounts};
use crate::records::{Batch, FieldValue};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Issue field naming the vulnerability category.
pub const CATEGORY_FIELD: &str = "issueName";

/// Issue field identifying the project version an issue belongs to.
pub const VERSION_ID_FIELD: &str = "projectVersionId";

/// Category label for issues without one.
pub const DEFAULT_CATEGORY: &str = "Unknown";

/// One vulnerability category with its tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedGroup {
    pub category: String,
    pub total: u64,

    /// Tallies for the four named severities; `unknown` always stays zero.
    pub severities: SeverityCounts,

    /// Number of distinct project versions the category was found in.
    pub version_count: u64,
}

/// The most frequent vulnerability categories of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRanking {
    /// Top groups by total, ties kept in first-encountered order.
    pub groups: Vec<RankedGroup>,

    /// Number of issues processed.
    pub processed: u64,

    /// Issues whose severity fell outside the four named levels.
    pub unrecognized_severity: u64,

    /// Number of categories before truncation to the top groups.
    pub distinct_categories: u64,

    /// Issues in the categories cut off by the truncation.
    pub remainder_total: u64,

    /// Named severity tallies of the categories cut off by the truncation.
    pub remainder: SeverityCounts,
}

#[derive(Debug)]
struct GroupBuilder {
    category: String,
    total: u64,
    severities: SeverityCounts,
    versions: HashSet<String>,
}

impl GroupBuilder {
    fn new(category: String) -> Self {
        Self {
            category,
            total: 0,
            severities: SeverityCounts::default(),
            versions: HashSet::new(),
        }
    }

    fn build(self) -> RankedGroup {
        RankedGroup {
            category: self.category,
            total: self.total,
            severities: self.severities,
            version_count: self.versions.len() as u64,
        }
    }
}

/// Groups issues by category and returns the `top` largest groups.
#[must_use]
pub fn rank_categories(issues: &Batch, top: usize) -> CategoryRanking {
    let mut builders: Vec<GroupBuilder> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unrecognized_severity = 0;

    for issue in issues.records() {
        let category = issue.str_field(CATEGORY_FIELD).present().unwrap_or(DEFAULT_CATEGORY);

        let slot = if let Some(&slot) = index.get(category) {
            slot
        } else {
            let slot = builders.len();
            builders.push(GroupBuilder::new(category.to_string()));
            let _ = index.insert(category.to_string(), slot);
            slot
        };
        let group = &mut builders[slot];

        group.total += 1;

        let severity = Severity::of(issue);
        if severity.is_named() {
            group.severities.increment(severity);
        } else {
            unrecognized_severity += 1;
        }

        if let FieldValue::Present(version_id) = issue.id_field(VERSION_ID_FIELD) {
            let _ = group.versions.insert(version_id);
        }
    }

    let distinct_categories = builders.len() as u64;

    builders.sort_by(|a, b| b.total.cmp(&a.total));

    let mut remainder_total = 0;
    let mut remainder = SeverityCounts::default();
    for dropped in builders.drain(top.min(builders.len())..) {
        remainder_total += dropped.total;
        for severity in Severity::named() {
            *remainder.get_mut(severity) += dropped.severities.get(severity);
        }
    }

    CategoryRanking {
        groups: builders.into_iter().map(GroupBuilder::build).collect(),
        processed: issues.sample_size(),
        unrecognized_severity,
        distinct_categories,
        remainder_total,
        remainder,
    }
}
