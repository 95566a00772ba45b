use chrono::{DateTime, SecondsFormat, Utc};
use std::time::SystemTime;

pub fn now_iso() -> String {
    let now: DateTime<Utc> = SystemTime::now().into();
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}
