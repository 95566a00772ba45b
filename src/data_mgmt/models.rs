use std::fmt;

use serde::{Deserialize, Serialize};

use crate::readers::FetchError;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Source {
    Awair,
    Kaiterra,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Awair => "Awair",
            Source::Kaiterra => "Kaiterra",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub enum RtValue {
    Bool(bool),
    Float(f64),
    Int(i64),
    String(String),
}

impl fmt::Display for RtValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtValue::Bool(b) => write!(f, "{b}"),
            RtValue::Float(v) => write!(f, "{v}"),
            RtValue::Int(i) => write!(f, "{i}"),
            RtValue::String(s) => f.write_str(s),
        }
    }
}

/// Sensor fields of a single reading, kept in the order they were set.
///
/// Column order of the consolidated output follows this order, so a plain
/// hash map is not an option here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, RtValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Fields {
            entries: Vec::new(),
        }
    }

    /// Overwrites the value in place if the key is already present
    pub fn set_field(&mut self, key: String, value: RtValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get_field(&self, key: &str) -> Option<&RtValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RtValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RtValue)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, RtValue)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.set_field(k.into(), v);
        }
        fields
    }
}

/// Latest reading of one device, or the reason it could not be obtained.
#[derive(Debug)]
pub struct ReadingRecord {
    pub source: Source,
    pub device_id: String,
    pub timestamp_utc: Option<String>,
    outcome: Result<Fields, FetchError>,
}

impl ReadingRecord {
    /// A record with no fields is a failed record
    pub fn from_fields(
        source: Source,
        device_id: &str,
        timestamp_utc: Option<String>,
        fields: Fields,
    ) -> Self {
        let outcome = if fields.is_empty() {
            Err(FetchError::NoData)
        } else {
            Ok(fields)
        };
        ReadingRecord {
            source,
            device_id: device_id.to_string(),
            timestamp_utc,
            outcome,
        }
    }

    pub fn failed(source: Source, device_id: &str, error: FetchError) -> Self {
        ReadingRecord {
            source,
            device_id: device_id.to_string(),
            timestamp_utc: None,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn fields(&self) -> Option<&Fields> {
        self.outcome.as_ref().ok()
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.outcome.as_ref().err()
    }

    pub fn error(&self) -> Option<String> {
        self.fetch_error().map(ToString::to_string)
    }
}
