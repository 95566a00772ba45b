use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SensorField {
    pub label: String,
    pub unit: String,
}

impl SensorField {
    pub fn column(&self) -> String {
        format!("{}_{}", self.label, self.unit)
    }
}

/// Awair sensor component key ("comp") to label and unit
pub type Driver = HashMap<String, SensorField>;

pub static AWAIR_SENSORS: Lazy<Driver> = Lazy::new(|| {
    serde_json::from_str::<Driver>(r#"
    {
        "temp": {"label": "Temperature", "unit": "°C"},
        "humid": {"label": "Humidity", "unit": "%"},
        "co2": {"label": "CO2", "unit": "ppm"},
        "voc": {"label": "VOC", "unit": "ppb"},
        "pm25": {"label": "PM2.5", "unit": "µg/m³"},
        "pm10": {"label": "PM10", "unit": "µg/m³"}
    }
    "#).unwrap()
});

pub const SCORE_COLUMN: &str = "Awair_Score";
