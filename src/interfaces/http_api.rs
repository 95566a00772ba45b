use std::sync::Arc;

use thiserror::Error;

use crate::constants::defaults;

#[derive(Error, Debug)]
pub enum HttpApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
}

pub fn get_ureq_agent() -> Result<ureq::Agent, HttpApiError> {
    Ok(ureq::AgentBuilder::new()
        .tls_connector(Arc::new(native_tls::TlsConnector::new()?))
        .timeout(defaults::API_REQUEST_TIMEOUT)
        .build())
}

/// GET `url` with a single authentication header and return the response body.
///
/// Anything outside 2xx is an error, as is a body that cannot be read.
pub fn get_with_api_key(
    agent: &ureq::Agent,
    url: &str,
    header: &str,
    api_key: &str,
) -> Result<String, HttpApiError> {
    log::debug!("GET {url}");
    let resp = agent
        .get(url)
        .set(header, api_key)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, resp) => status_error(code, resp.status_text()),
            ureq::Error::Transport(t) => HttpApiError::Transport(t.to_string()),
        })?;

    if !(200..300).contains(&resp.status()) {
        return Err(status_error(resp.status(), resp.status_text()));
    }

    resp.into_string()
        .map_err(|e| HttpApiError::Transport(format!("failed to read response body: {e}")))
}

fn status_error(code: u16, status_text: &str) -> HttpApiError {
    let reason = match status_text.trim() {
        "" => canonical_reason(code).to_string(),
        text => text.to_string(),
    };
    HttpApiError::Status { code, reason }
}

fn canonical_reason(code: u16) -> &'static str {
    match code {
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown Status",
    }
}
