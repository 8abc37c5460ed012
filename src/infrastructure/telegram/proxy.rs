use reqwest::{Client, Proxy, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

const PROBE_URL: &str = "https://www.google.com";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid proxy {0}: {1}")]
    InvalidUrl(String, reqwest::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the HTTP client for the Bot API. With a proxy, one probe request
/// is sent through it; only a failed request is an error.
pub async fn build_client(proxy: Option<&str>) -> Result<Client, ProxyError> {
    let Some(proxy) = proxy.filter(|p| !p.is_empty()) else {
        return Ok(Client::builder().build()?);
    };

    info!(proxy, "verifying proxy");
    let client = Client::builder()
        .proxy(Proxy::all(proxy).map_err(|e| ProxyError::InvalidUrl(proxy.to_string(), e))?)
        .build()?;

    let status = client.get(PROBE_URL).send().await?.status();
    if probe_passed(status) {
        info!(proxy, "proxy reachable");
    } else {
        warn!(proxy, %status, "proxy probe returned unexpected status, continuing");
    }

    Ok(client)
}

fn probe_passed(status: StatusCode) -> bool {
    status == StatusCode::OK
}
