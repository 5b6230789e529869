//! `reqwest` transport for the game API.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use game::wire::status_error;
use game::{ApiRequest, Method, SyncError, Transport};
use tracing::debug;

use crate::CliError;

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

pub(crate) fn validate_base_url(base_url: &str) -> Result<(), CliError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::InvalidBaseUrl(base_url.to_owned()))
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn network(error: reqwest::Error) -> SyncError {
    SyncError::Network(error.to_string())
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        validate_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("memory-trainer-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, SyncError> {
        let url = join_url(&self.base_url, &request.path);
        debug!(method = ?request.method, %url, "api request");
        let mut builder = self.client.request(reqwest_method(request.method), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(network)?;
        let status = response.status();
        let text = response.text().await.map_err(network)?;
        debug!(status = status.as_u16(), bytes = text.len(), "api response");
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}
