use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// Scan field naming the analysis engine that produced a scan.
pub const SCAN_TYPE_FIELD: &str = "scanType";

/// Kind of security analysis a scan represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, IntoStaticStr, Serialize)]
pub enum ScanType {
    #[strum(serialize = "SAST")]
    #[serde(rename = "SAST")]
    Sast,

    #[strum(serialize = "DAST")]
    #[serde(rename = "DAST")]
    Dast,

    #[strum(serialize = "SCA")]
    #[serde(rename = "SCA")]
    Sca,

    Other,
}

impl ScanType {
    /// Exact match against `SAST`, `DAST` and `SCA`; everything else, including a missing value, is `Other`.
    #[must_use]
    pub fn classify(value: Option<&str>) -> Self {
        match value {
            Some("SAST") => Self::Sast,
            Some("DAST") => Self::Dast,
            Some("SCA") => Self::Sca,
            _ => Self::Other,
        }
    }
}
