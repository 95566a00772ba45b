use serde::Deserialize;
use serde_json::Value;

use crate::data_mgmt::models::Fields;
use crate::readers::{rt_value_from_json, FetchError, LatestReading};

use super::driver::{Driver, SCORE_COLUMN};

#[derive(Debug, Deserialize)]
struct Sensor {
    #[serde(default)]
    comp: String,
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Deserialize)]
struct Sample {
    timestamp: Option<String>,
    score: Option<Value>,
    #[serde(default)]
    sensors: Vec<Sensor>,
}

/// The API wraps the sample in a "data" array; a bare sample is accepted too.
///
/// A body carrying a "data" key is always read as the wrapped shape, so a
/// malformed wrapped sample is a parse error rather than an empty reading.
pub fn parse_latest(body: &str, driver: &Driver) -> Result<LatestReading, FetchError> {
    let mut payload = serde_json::from_str::<Value>(body)?;
    let wrapped = payload.as_object_mut().and_then(|obj| obj.remove("data"));
    let sample = match wrapped {
        None => payload,
        Some(Value::Array(samples)) => match samples.into_iter().next() {
            Some(sample) => sample,
            None => return Ok(LatestReading::default()),
        },
        Some(other) => {
            return Err(FetchError::Parse(format!(
                "expected an array of samples under \"data\", got {other}"
            )))
        }
    };
    let sample = serde_json::from_value::<Sample>(sample)?;
    Ok(flatten_sample(sample, driver))
}

fn flatten_sample(sample: Sample, driver: &Driver) -> LatestReading {
    let mut fields = Fields::new();

    for sensor in sample.sensors {
        let Some(field) = driver.get(&sensor.comp) else {
            log::debug!("Dropping unmapped Awair sensor '{}'", sensor.comp);
            continue;
        };
        if let Some(value) = rt_value_from_json(&sensor.value) {
            fields.set_field(field.column(), value);
        }
    }

    if let Some(score) = sample.score.as_ref().and_then(rt_value_from_json) {
        fields.set_field(SCORE_COLUMN.into(), score);
    }

    LatestReading {
        timestamp_utc: sample.timestamp,
        fields,
    }
}
