use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data_mgmt::models::Fields;
use crate::readers::{rt_value_from_json, FetchError, LatestReading};

/// Display names for parameter keys. The unit always comes from the payload.
const PARAM_LABELS: &[(&str, &str)] = &[
    ("pm25", "PM2.5"),
    ("pm10", "PM10"),
    ("tvoc", "TVOC"),
    ("temp", "Temperature"),
    ("humid", "Humidity"),
    ("co2", "CO2"),
];

const AQI_PREFIX: &str = "AQI_";

#[derive(Debug, Deserialize)]
struct Point {
    param: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    units: Option<String>,
    #[serde(default)]
    unit: Option<String>,
}

impl Point {
    fn units(&self) -> Option<&str> {
        self.units.as_deref().or(self.unit.as_deref())
    }
}

// Either a list of points, or an object keyed by parameter name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Points {
    List(Vec<Point>),
    Keyed(Map<String, Value>),
}

impl Points {
    fn into_points(self) -> Vec<Point> {
        match self {
            Points::List(points) => points,
            Points::Keyed(map) => map
                .into_iter()
                .filter_map(|(param, entry)| match entry {
                    Value::Object(mut obj) => Some(Point {
                        param,
                        value: obj.remove("value").unwrap_or(Value::Null),
                        units: obj
                            .get("units")
                            .or_else(|| obj.get("unit"))
                            .and_then(Value::as_str)
                            .map(String::from),
                        unit: None,
                    }),
                    _ => None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Latest {
    time: Option<String>,
    ts: Option<String>,
    data: Option<Points>,
    aqi: Option<Points>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    latest: Option<Latest>,
    info: Option<Value>,
}

pub fn parse_latest(body: &str) -> Result<LatestReading, FetchError> {
    let payload = serde_json::from_str::<Payload>(body)?;

    let fallback_ts = payload
        .info
        .as_ref()
        .and_then(|info| info.pointer("/aqi/ts"))
        .and_then(Value::as_str)
        .map(String::from);

    let Some(latest) = payload.latest else {
        return Ok(LatestReading {
            timestamp_utc: fallback_ts,
            fields: Fields::new(),
        });
    };

    let mut fields = Fields::new();
    for point in latest.data.map(Points::into_points).unwrap_or_default() {
        if let Some(value) = rt_value_from_json(&point.value) {
            fields.set_field(measurement_column(&point.param, point.units()), value);
        }
    }
    for point in latest.aqi.map(Points::into_points).unwrap_or_default() {
        if let Some(value) = rt_value_from_json(&point.value) {
            fields.set_field(format!("{AQI_PREFIX}{}", point.param), value);
        }
    }

    Ok(LatestReading {
        timestamp_utc: latest.time.or(latest.ts).or(fallback_ts),
        fields,
    })
}

fn param_label(param: &str) -> String {
    PARAM_LABELS
        .iter()
        .find(|(key, _)| *key == param)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| param.to_uppercase())
}

/// `<Label>_<unit>` with the unit exactly as the vendor reported it
fn measurement_column(param: &str, units: Option<&str>) -> String {
    let label = param_label(param);
    match units.map(str::trim) {
        Some(units) if !units.is_empty() => format!("{label}_{units}"),
        _ => label,
    }
}
