use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const LOG_LEVEL: &str = "INFO";

pub const CONFIG_FILE: &str = "config.json";
pub const OUTPUT_FILE: &str = "latest_air_quality_data.csv";

pub const AWAIR_BASE_URL: &str = "https://developer-apis.awair.is/v1/users/self/devices";
// 10 requests per minute
pub const AWAIR_REQUEST_DELAY: Duration = Duration::from_secs(6);

pub const KAITERRA_BASE_URL: &str = "https://api.kaiterra.com/v1/lasereggs";
