use crate::records::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

const LOG_TARGET: &str = "  severity";

/// Issue field carrying the severity, either as a label or as a numeric code.
pub const SEVERITY_FIELD: &str = "severity";

/// Upper bounds (inclusive) of the numeric codes mapped to each named severity.
const CRITICAL_MAX_CODE: f64 = 1.0;
const HIGH_MAX_CODE: f64 = 2.0;
const MEDIUM_MAX_CODE: f64 = 3.0;
const LOW_MAX_CODE: f64 = 4.0;

/// Severity bucket of an issue, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, IntoStaticStr, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Maps a label by exact match; anything other than the four named levels is `Unknown`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Unknown,
        }
    }

    /// Maps a numeric code where 1.0 is the most severe.
    ///
    /// Codes above 4.0 (no severe finding) and NaN map to `Unknown`.
    #[must_use]
    pub fn from_code(code: f64) -> Self {
        if code <= CRITICAL_MAX_CODE {
            Self::Critical
        } else if code <= HIGH_MAX_CODE {
            Self::High
        } else if code <= MEDIUM_MAX_CODE {
            Self::Medium
        } else if code <= LOW_MAX_CODE {
            Self::Low
        } else {
            Self::Unknown
        }
    }

    /// Reads the severity of an issue record, accepting labels, numbers and numeric strings.
    #[must_use]
    pub fn of(issue: &Record) -> Self {
        if let FieldValue::Present(label) = issue.str_field(SEVERITY_FIELD) {
            let severity = Self::from_label(label);
            if severity != Self::Unknown {
                return severity;
            }
        }

        match issue.f64_field(SEVERITY_FIELD) {
            FieldValue::Present(code) => Self::from_code(code),
            FieldValue::Missing => Self::Unknown,
            FieldValue::Malformed => {
                log::debug!(target: LOG_TARGET, "Unrecognized severity value: {:?}", issue.get(SEVERITY_FIELD));
                Self::Unknown
            }
        }
    }

    /// Whether this is one of the four named levels.
    #[must_use]
    pub const fn is_named(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The four named levels, most severe first.
    pub fn named() -> impl Iterator<Item = Self> {
        Self::iter().filter(|s| s.is_named())
    }
}

/// One value per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerSeverity<T> {
    pub critical: T,
    pub high: T,
    pub medium: T,
    pub low: T,
    pub unknown: T,
}

impl<T> PerSeverity<T> {
    #[must_use]
    pub const fn get(&self, severity: Severity) -> &T {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
            Severity::Unknown => &self.unknown,
        }
    }

    pub const fn get_mut(&mut self, severity: Severity) -> &mut T {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Unknown => &mut self.unknown,
        }
    }

    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(Severity, T) -> U) -> PerSeverity<U> {
        PerSeverity {
            critical: f(Severity::Critical, self.critical),
            high: f(Severity::High, self.high),
            medium: f(Severity::Medium, self.medium),
            low: f(Severity::Low, self.low),
            unknown: f(Severity::Unknown, self.unknown),
        }
    }
}

/// Record counts per severity bucket.
pub type SeverityCounts = PerSeverity<u64>;

impl SeverityCounts {
    pub fn increment(&mut self, severity: Severity) {
        *self.get_mut(severity) += 1;
    }

    /// Sum over the four named levels.
    #[must_use]
    pub const fn named_total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.named_total() + self.unknown
    }
}
