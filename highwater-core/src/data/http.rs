//! Shared blocking HTTP plumbing for the live providers.

use super::provider::DataError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> Result<Client, DataError> {
    Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))
}

/// Send a GET and classify transport failures and non-success statuses.
pub(crate) fn get(client: &Client, url: &str, symbol: &str) -> Result<Response, DataError> {
    let resp = client
        .get(url)
        .send()
        .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    Err(match status {
        StatusCode::UNAUTHORIZED => {
            DataError::AuthenticationRequired(format!("HTTP 401 for {symbol}"))
        }
        StatusCode::FORBIDDEN => DataError::Forbidden(format!("HTTP 403 for {symbol}")),
        StatusCode::TOO_MANY_REQUESTS => DataError::RateLimited {
            retry_after_secs: resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
        },
        StatusCode::NOT_FOUND => DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        },
        _ => DataError::Other(format!("HTTP {status} for {symbol}")),
    })
}
