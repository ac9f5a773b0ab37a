//! Shared reqwest plumbing for the directory and login adapters.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url, header};

const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_USER_AGENT: &str = "admin-console/0.1";

/// Connection settings shared by the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    /// Server root; API paths are resolved against it.
    pub base_url: Url,
    /// Optional value for the `x-api-key` header.
    pub api_key: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl HttpEndpoint {
    /// Endpoint without an API key.
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout,
        }
    }

    /// Attach an API key sent on every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[derive(Debug, Clone)]
pub(super) struct Transport {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl Transport {
    pub(super) fn new(endpoint: HttpEndpoint) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(endpoint.base_url),
            api_key: endpoint.api_key,
        })
    }

    pub(super) fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }

    pub(super) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key.as_str()),
            None => builder,
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Whitespace-compacted body excerpt for error messages.
pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

pub(super) fn transport_message(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    }
}
