use super::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single object from an SSC list response.
///
/// Field names are the SSC wire names (`severity`, `foundDate`, `projectVersionId`, ...)
/// and are looked up verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw value of a field, treating `null` as missing.
    #[must_use]
    pub fn get(&self, name: &str) -> FieldValue<&Value> {
        read_value(self.0.get(name))
    }

    #[must_use]
    pub fn str_field(&self, name: &str) -> FieldValue<&str> {
        read_str(self.0.get(name))
    }

    /// Reads a number, also accepting numeric strings such as `"3.0"`.
    #[must_use]
    pub fn f64_field(&self, name: &str) -> FieldValue<f64> {
        read_f64(self.0.get(name))
    }

    #[must_use]
    pub fn bool_field(&self, name: &str) -> FieldValue<bool> {
        match read_value(self.0.get(name)) {
            FieldValue::Present(Value::Bool(b)) => FieldValue::Present(*b),
            FieldValue::Present(_) | FieldValue::Malformed => FieldValue::Malformed,
            FieldValue::Missing => FieldValue::Missing,
        }
    }

    /// Reads an identifier, normalizing integer ids and string ids to the same text form.
    ///
    /// An empty string is treated as missing.
    #[must_use]
    pub fn id_field(&self, name: &str) -> FieldValue<String> {
        match read_value(self.0.get(name)) {
            FieldValue::Present(Value::String(s)) if s.is_empty() => FieldValue::Missing,
            FieldValue::Present(Value::String(s)) => FieldValue::Present(s.clone()),
            FieldValue::Present(Value::Number(n)) => FieldValue::Present(n.to_string()),
            FieldValue::Present(_) | FieldValue::Malformed => FieldValue::Malformed,
            FieldValue::Missing => FieldValue::Missing,
        }
    }

    /// Walks nested objects along `path` and yields the objects of the list found at its end.
    ///
    /// For example, `["embed", "scans"]` yields each scan embedded in an artifact.
    /// Anything that is not an object along the way, or a list element that is not
    /// an object, is skipped.
    pub fn nested<'a>(&'a self, path: &[&str]) -> impl Iterator<Item = Entry<'a>> + use<'a> {
        let mut current = Some(&self.0);
        let mut list: Option<&'a Vec<Value>> = None;

        for (index, segment) in path.iter().enumerate() {
            let Some(object) = current else {
                break;
            };

            match object.get(*segment) {
                Some(Value::Object(inner)) if index + 1 < path.len() => current = Some(inner),
                Some(Value::Array(items)) if index + 1 == path.len() => list = Some(items),
                _ => current = None,
            }
        }

        list.into_iter().flatten().filter_map(Value::as_object).map(Entry)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A borrowed object nested inside a record, such as an embedded scan.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a>(&'a Map<String, Value>);

impl<'a> Entry<'a> {
    #[must_use]
    pub fn str_field(&self, name: &str) -> FieldValue<&'a str> {
        read_str(self.0.get(name))
    }

    #[must_use]
    pub fn f64_field(&self, name: &str) -> FieldValue<f64> {
        read_f64(self.0.get(name))
    }
}

fn read_value(value: Option<&Value>) -> FieldValue<&Value> {
    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(v) => FieldValue::Present(v),
    }
}

fn read_str(value: Option<&Value>) -> FieldValue<&str> {
    read_value(value).and_then(|v| v.as_str().map_or(FieldValue::Malformed, FieldValue::Present))
}

fn read_f64(value: Option<&Value>) -> FieldValue<f64> {
    let number = match read_value(value) {
        FieldValue::Present(Value::Number(n)) => n.as_f64(),
        FieldValue::Present(Value::String(s)) => s.trim().parse::<f64>().ok(),
        FieldValue::Present(_) | FieldValue::Malformed => None,
        FieldValue::Missing => return FieldValue::Missing,
    };

    match number {
        Some(n) if n.is_finite() => FieldValue::Present(n),
        _ => FieldValue::Malformed,
    }
}
