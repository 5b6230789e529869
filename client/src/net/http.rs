//! `gloo-net` transport for the game API.
//!
//! Client-side (csr): real `fetch` calls.
//! Host builds: every request fails with a network error since there is no
//! browser to send it from.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `SyncError::Network`. A non-success status is
//! surfaced through `game::wire::status_error`, which keeps any `error` text
//! the server put in the body.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use game::{ApiRequest, SyncError, Transport};

#[cfg(any(test, feature = "csr"))]
fn request_url(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "HTTP is only available in the browser";

/// Same-origin (or `api_base`-prefixed) HTTP transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, SyncError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let network = |e: gloo_net::Error| SyncError::Network(e.to_string());
            let url = request_url(&self.base, &request.path);
            let builder = match request.method {
                game::Method::Get => Request::get(&url),
                game::Method::Post => Request::post(&url),
                game::Method::Delete => Request::delete(&url),
            };
            let response = match &request.body {
                Some(body) => builder.json(body).map_err(network)?.send().await,
                None => builder.send().await,
            }
            .map_err(network)?;
            let status = response.status();
            let text = response.text().await.map_err(network)?;
            if !response.ok() {
                return Err(game::wire::status_error(status, &text));
            }
            Ok(text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(SyncError::Network(UNAVAILABLE.to_owned()))
        }
    }
}
