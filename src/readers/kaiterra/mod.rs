use crate::data_mgmt::models::{ReadingRecord, Source};
use crate::interfaces::http_api;

use super::{endpoint_url, finish_fetch, FetchError, LatestReading, VendorAdapter};

mod parse;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Kaiterra Sensedge / Laser Egg devices through the public API
pub struct KaiterraAdapter {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl KaiterraAdapter {
    pub fn new(agent: ureq::Agent, base_url: &str, api_key: &str) -> Self {
        KaiterraAdapter {
            agent,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn try_fetch(&self, device_id: &str) -> Result<LatestReading, FetchError> {
        let url = endpoint_url(&self.base_url, &[device_id])?;
        let body = http_api::get_with_api_key(&self.agent, &url, API_KEY_HEADER, &self.api_key)?;
        parse::parse_latest(&body)
    }
}

impl VendorAdapter for KaiterraAdapter {
    fn source(&self) -> Source {
        Source::Kaiterra
    }

    fn fetch_latest(&self, device_id: &str) -> ReadingRecord {
        finish_fetch(Source::Kaiterra, device_id, self.try_fetch(device_id))
    }
}
