//! HTTP utilities for stat provider communication

use crate::Result;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default headers sent with every provider request
pub fn default_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("playoff-ffl/", env!("CARGO_PKG_VERSION"))),
    );
    h
}

/// Build a client with JSON headers and a per-request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .default_headers(default_header_map())
        .timeout(timeout)
        .build()?)
}

/// GET a URL and decode the body as JSON, failing on non-2xx statuses
pub async fn get_json(client: &Client, url: &str) -> Result<Value> {
    let res = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(res)
}
