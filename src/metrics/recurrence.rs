use super::ranking::{CATEGORY_FIELD, DEFAULT_CATEGORY, VERSION_ID_FIELD};
use crate::records::{Batch, FieldValue};
use serde::Serialize;
use std::collections::HashMap;

const LOG_TARGET: &str = "recurrence";

/// Issue field set to `true` once an issue is no longer detected.
pub const REMOVED_FIELD: &str = "removed";

/// A version and category whose issues are partly open and partly removed.
///
/// This hints at a vulnerability that was fixed and came back, but several issues in one
/// category do not prove that a reopen happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceCandidate {
    pub version_id: String,
    pub category: String,
    pub open: u64,
    pub removed: u64,
}

/// Finds recurrence candidates in a batch of issues that includes removed ones.
///
/// Issues without a version are skipped. Candidates come back in first-encountered order.
#[must_use]
pub fn find_recurrence_candidates(issues: &Batch) -> Vec<RecurrenceCandidate> {
    let mut groups: Vec<RecurrenceCandidate> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for issue in issues.records() {
        let FieldValue::Present(version_id) = issue.id_field(VERSION_ID_FIELD) else {
            continue;
        };
        let category = issue.str_field(CATEGORY_FIELD).present().unwrap_or(DEFAULT_CATEGORY).to_string();

        let removed = match issue.bool_field(REMOVED_FIELD) {
            FieldValue::Present(removed) => removed,
            FieldValue::Missing => false,
            FieldValue::Malformed => {
                log::debug!(target: LOG_TARGET, "Treating non-boolean {REMOVED_FIELD} value as open: {:?}", issue.get(REMOVED_FIELD));
                false
            }
        };

        let slot = *index.entry((version_id.clone(), category.clone())).or_insert_with(|| {
            groups.push(RecurrenceCandidate {
                version_id,
                category,
                open: 0,
                removed: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        if removed {
            group.removed += 1;
        } else {
            group.open += 1;
        }
    }

    groups.retain(|g| g.open > 0 && g.removed > 0);
    groups
}
