use super::Record;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Serialize;
use serde_json::Value;
use std::fs;

const LOG_TARGET: &str = "   records";

/// Name of the response field holding the record sequence.
const DATA_FIELD: &str = "data";

/// Name of the response field holding the size of the full population.
const TOTAL_COUNT_FIELD: &str = "totalCount";

/// A response that cannot be turned into a batch at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("response has no `data` record sequence")]
    MissingRecords,

    #[error("response `data` is a {found}, not a list of records")]
    NotAList { found: &'static str },

    #[error("element {index} of the record sequence is not an object")]
    NotARecord { index: usize },
}

/// How a batch relates to the population it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Sampling {
    /// The batch holds the whole population, or no population size is known.
    Complete { sample_size: u64 },

    /// The batch is a strict subset of a larger population.
    Sampled { sample_size: u64, total_count: u64 },

    /// The batch holds more records than the reported population size.
    Inconsistent { sample_size: u64, total_count: u64 },
}

impl Sampling {
    #[must_use]
    pub const fn sample_size(self) -> u64 {
        match self {
            Self::Complete { sample_size } | Self::Sampled { sample_size, .. } | Self::Inconsistent { sample_size, .. } => sample_size,
        }
    }

    #[must_use]
    pub const fn is_inconsistent(self) -> bool {
        matches!(self, Self::Inconsistent { .. })
    }
}

/// An ordered sequence of records plus the optional size of the population it was taken from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    records: Vec<Record>,
    total_count: Option<u64>,
}

impl Batch {
    #[must_use]
    pub const fn new(records: Vec<Record>, total_count: Option<u64>) -> Self {
        Self { records, total_count }
    }

    /// Builds a batch from an SSC list response.
    ///
    /// The response is either an object with a `data` list (and optionally `totalCount`),
    /// or a bare list of records.
    pub fn from_response(response: &Value) -> Result<Self, BatchError> {
        let (data, total_count) = match response {
            Value::Array(_) => (response, None),
            Value::Object(fields) => {
                let data = fields.get(DATA_FIELD).ok_or(BatchError::MissingRecords)?;
                (data, fields.get(TOTAL_COUNT_FIELD).and_then(read_total_count))
            }
            _ => return Err(BatchError::MissingRecords),
        };

        let Value::Array(items) = data else {
            return Err(BatchError::NotAList { found: type_name(data) });
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(Record::new(fields.clone())),
                _ => Err(BatchError::NotARecord { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records, total_count })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    #[must_use]
    pub fn sample_size(&self) -> u64 {
        self.records.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compares the number of records held against the reported population size.
    #[must_use]
    pub fn sampling(&self) -> Sampling {
        let sample_size = self.sample_size();
        match self.total_count {
            Some(total_count) if sample_size < total_count => Sampling::Sampled { sample_size, total_count },
            Some(total_count) if sample_size > total_count => Sampling::Inconsistent { sample_size, total_count },
            _ => Sampling::Complete { sample_size },
        }
    }
}

impl FromIterator<Record> for Batch {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), None)
    }
}

/// Loads a saved SSC response from a JSON file.
pub fn load_batch(path: &Utf8Path) -> Result<Batch> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading records from '{path}'"))?;
    let response: Value = serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON in '{path}'"))?;
    let batch = Batch::from_response(&response).into_app_err_with(|| format!("loading records from '{path}'"))?;

    log::debug!(target: LOG_TARGET, "Loaded {} record(s) from '{path}' ({:?})", batch.sample_size(), batch.sampling());
    Ok(batch)
}

fn read_total_count(value: &Value) -> Option<u64> {
    let count = value.as_u64();
    if count.is_none() && !value.is_null() {
        log::debug!(target: LOG_TARGET, "Ignoring unusable {TOTAL_COUNT_FIELD} value: {value}");
    }
    count
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
