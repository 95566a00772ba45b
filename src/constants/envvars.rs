pub const LOG_LEVEL: &str = "LOGGING_LEVEL";

pub const AWAIR_API_KEY: &str = "AWAIR_API_KEY";
pub const KAITERRA_API_KEY: &str = "KAITERRA_API_KEY";
