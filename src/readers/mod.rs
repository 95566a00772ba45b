//! Vendor adapters: fetch the latest reading of one device and flatten it
//! into a [`ReadingRecord`].
//!
//! Adapters never fail past their own boundary. Transport, HTTP status, parse
//! and empty-payload failures all end up as the error of the returned record.
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::data_mgmt::models::{Fields, ReadingRecord, RtValue, Source};
use crate::interfaces::http_api::HttpApiError;

pub mod awair;
pub mod kaiterra;

pub use awair::AwairAdapter;
pub use kaiterra::KaiterraAdapter;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpApiError),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no data extracted")]
    NoData,
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

pub trait VendorAdapter {
    fn source(&self) -> Source;

    /// Always returns a record; failures are carried inside it
    fn fetch_latest(&self, device_id: &str) -> ReadingRecord;
}

/// Flattened payload of a "latest reading" response
#[derive(Debug, Default, PartialEq)]
pub struct LatestReading {
    pub timestamp_utc: Option<String>,
    pub fields: Fields,
}

impl LatestReading {
    pub(crate) fn into_record(self, source: Source, device_id: &str) -> ReadingRecord {
        ReadingRecord::from_fields(source, device_id, self.timestamp_utc, self.fields)
    }
}

pub(crate) fn finish_fetch(
    source: Source,
    device_id: &str,
    result: Result<LatestReading, FetchError>,
) -> ReadingRecord {
    let record = match result {
        Ok(latest) => latest.into_record(source, device_id),
        Err(e) => ReadingRecord::failed(source, device_id, e),
    };
    log_outcome(&record);
    record
}

/// Append path segments to `base_url`, escaping each one
pub(crate) fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<String, FetchError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| HttpApiError::Transport(format!("invalid base URL '{base_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| HttpApiError::Transport(format!("base URL '{base_url}' cannot have a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Scalar JSON values only; null, arrays and objects are not readings
pub(crate) fn rt_value_from_json(value: &Value) -> Option<RtValue> {
    match value {
        Value::Bool(b) => Some(RtValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(RtValue::Int)
            .or_else(|| n.as_f64().map(RtValue::Float)),
        Value::String(s) => Some(RtValue::String(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn log_outcome(record: &ReadingRecord) {
    match record.fetch_error() {
        Some(e) => log::warn!("{} device {}: {}", record.source, record.device_id, e),
        None => log::info!(
            "{} device {}: {} fields",
            record.source,
            record.device_id,
            record.fields().map_or(0, |f| f.len())
        ),
    }
}
