//! HttpGateway - JSON POST transport
//!
//! ## Responsibilities
//!
//! - Perform a single HTTP request given URL, body and headers
//! - Return status code and parsed body to the caller
//!
//! No protocol knowledge lives here; error-kind mapping is the caller's
//! job. Transport failures surface as `Error::Transport`.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::Result;

/// HTTP gateway shared by all protocol adapters
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
}

impl HttpGateway {
    /// Create a new gateway.
    ///
    /// Redirects are disabled: a redirect would turn the POST into a GET
    /// and silently break the broker protocol.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    /// POST a JSON body and return `(status, body)`.
    ///
    /// The body is `None` when the response is empty or not valid JSON;
    /// interpreting that is left to the protocol adapters.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        headers: &[(String, String)],
    ) -> Result<(u16, Option<serde_json::Value>)> {
        let mut req = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body);

        for (key, value) in headers {
            req = req.header(key, value);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await.ok();

        tracing::debug!(url = %url, status = status, has_body = body.is_some(), "POST completed");

        Ok((status, body))
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}
