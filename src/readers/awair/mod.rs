use crate::data_mgmt::models::{ReadingRecord, Source};
use crate::interfaces::http_api;

use super::{endpoint_url, finish_fetch, FetchError, LatestReading, VendorAdapter};

mod driver;
mod parse;

use driver::AWAIR_SENSORS;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Awair Omni devices through the developer API
pub struct AwairAdapter {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl AwairAdapter {
    pub fn new(agent: ureq::Agent, base_url: &str, api_key: &str) -> Self {
        AwairAdapter {
            agent,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn latest_url(&self, device_id: &str) -> Result<String, FetchError> {
        endpoint_url(
            &self.base_url,
            &["omni", device_id, "air-data", "latest"],
        )
    }

    fn try_fetch(&self, device_id: &str) -> Result<LatestReading, FetchError> {
        let url = self.latest_url(device_id)?;
        let body = http_api::get_with_api_key(&self.agent, &url, API_KEY_HEADER, &self.api_key)?;
        parse::parse_latest(&body, &AWAIR_SENSORS)
    }
}

impl VendorAdapter for AwairAdapter {
    fn source(&self) -> Source {
        Source::Awair
    }

    fn fetch_latest(&self, device_id: &str) -> ReadingRecord {
        finish_fetch(Source::Awair, device_id, self.try_fetch(device_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_mgmt::models::{Fields, RtValue};
    use crate::interfaces::http_api::get_ureq_agent;

    const API_KEY: &str = "awair-secret";
    const DEVICE_ID: &str = "12345";
    const LATEST_PATH: &str = "/v1/users/self/devices/omni/12345/air-data/latest";

    fn adapter(server: &mockito::Server) -> AwairAdapter {
        AwairAdapter::new(
            get_ureq_agent().unwrap(),
            &format!("{}/v1/users/self/devices", server.url()),
            API_KEY,
        )
    }

    #[test]
    fn test_fetch_latest_success() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", LATEST_PATH)
            .match_header("x-api-key", API_KEY)
            .with_body(r#"{"sensors":[{"comp":"co2","value":450},{"comp":"voc","value":120}],"score":85,"timestamp":"2024-01-01T00:00:00Z"}"#)
            .expect(1)
            .create();

        let rec = adapter(&server).fetch_latest(DEVICE_ID);

        m.assert();
        assert_eq!(rec.source, Source::Awair);
        assert_eq!(rec.device_id, DEVICE_ID);
        assert_eq!(rec.timestamp_utc.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert!(rec.error().is_none());
        assert_eq!(
            rec.fields(),
            Some(&Fields::from_iter([
                ("CO2_ppm", RtValue::Int(450)),
                ("VOC_ppb", RtValue::Int(120)),
                ("Awair_Score", RtValue::Int(85)),
            ]))
        );
    }

    #[test]
    fn test_fetch_latest_not_found() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", LATEST_PATH).with_status(404).create();

        let rec = adapter(&server).fetch_latest(DEVICE_ID);

        assert_eq!(rec.error().as_deref(), Some("HTTP 404: Not Found"));
        assert!(rec.fields().is_none());
        assert!(rec.timestamp_utc.is_none());
    }

    #[test]
    fn test_fetch_latest_bad_json() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_body("<html>maintenance</html>")
            .create();

        let rec = adapter(&server).fetch_latest(DEVICE_ID);

        assert!(rec.error().unwrap().starts_with("parse error: "));
        assert!(rec.fields().is_none());
    }

    #[test]
    fn test_fetch_latest_only_unknown_sensors() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_body(r#"{"sensors":[{"comp":"lux","value":12}],"timestamp":"2024-01-01T00:00:00Z"}"#)
            .create();

        let rec = adapter(&server).fetch_latest(DEVICE_ID);

        assert_eq!(rec.error().as_deref(), Some("no data extracted"));
    }

    #[test]
    fn test_fetch_latest_unreachable() {
        let rec = AwairAdapter::new(get_ureq_agent().unwrap(), "http://127.0.0.1:1", API_KEY)
            .fetch_latest(DEVICE_ID);

        assert!(rec.error().unwrap().starts_with("network error: "));
        assert!(rec.fields().is_none());
    }
}
