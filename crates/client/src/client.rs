// ABOUTME: The Client struct and its single request primitive over the Telegraph JSON API.
// ABOUTME: Encodes the body, sends it with a fixed timeout, checks status, and decodes the envelope.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, ApiMethod};
use crate::options::{ClientBuilder, Options};
use crate::types::Envelope;

/// Blocking client for the Telegraph API.
///
/// Each call performs one HTTP request and never retries. The client is cheap
/// to clone and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::blocking::Client,
}

impl Client {
    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ApiError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .build()
                .map_err(|e| {
                    ApiError::transport("Client::new", anyhow::Error::new(e).context("failed to build HTTP client"))
                })?,
        };

        Ok(Self { opts, http_client })
    }

    /// Create a new ClientBuilder for fluent configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn base_url(&self) -> &str {
        &self.opts.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.opts.base_url = base_url.into();
    }

    pub fn is_debug(&self) -> bool {
        self.opts.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.opts.debug = debug;
    }

    /// Send one request for `method` and decode the envelope.
    ///
    /// The endpoint is the method name, followed by `/<path>` when a path is
    /// given. Errors report the method name as their `op`. The caller checks
    /// `ok` on the returned envelope; see [`Envelope::into_result`].
    pub fn request<B, T>(
        &self,
        http_method: Method,
        method: ApiMethod,
        path: Option<&str>,
        body: Option<&B>,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let op = method.name();
        let endpoint = match path {
            Some(path) => format!("{}/{}", op, path),
            None => op.to_string(),
        };
        let url = self.endpoint_url(op, &endpoint)?;

        let payload = match body {
            Some(body) => Some(serde_json::to_vec(body).map_err(|e| {
                ApiError::transport(op, anyhow::Error::new(e).context("failed to encode request body"))
            })?),
            None => None,
        };

        if self.opts.debug {
            debug!(
                method = %http_method,
                url = %url,
                body = %payload.as_deref().map(redact_for_log).unwrap_or_default(),
                "sending request"
            );
        }

        let mut request = self
            .http_client
            .request(http_method, url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.opts.timeout);
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().map_err(|e| {
            ApiError::transport(op, anyhow::Error::new(e).context("request failed"))
        })?;
        let status = response.status();
        let text = response.text().map_err(|e| {
            ApiError::transport(op, anyhow::Error::new(e).context("failed to read response body"))
        })?;

        if self.opts.debug {
            debug!(
                status = status.as_u16(),
                body = %redact_for_log(text.as_bytes()),
                "received response"
            );
        }

        if !status.is_success() {
            // Some deployments send the error envelope with a 4xx status.
            let description = serde_json::from_str::<Envelope<Value>>(&text)
                .ok()
                .and_then(|env| env.error);
            return Err(ApiError::unexpected_status(op, status.as_u16(), description));
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::decode(op, anyhow::Error::new(e).context("failed to decode response"))
        })
    }

    /// Resolve an endpoint against the base URL, treating the base as a directory.
    fn endpoint_url(&self, op: &str, endpoint: &str) -> Result<Url, ApiError> {
        let mut base = Url::parse(&self.opts.base_url).map_err(|e| {
            ApiError::transport(
                op,
                anyhow::anyhow!("invalid base URL {:?}: {}", self.opts.base_url, e),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::transport(
                op,
                anyhow::anyhow!("invalid base URL {:?}: cannot be a base", self.opts.base_url),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(endpoint).map_err(|e| {
            ApiError::transport(op, anyhow::anyhow!("invalid endpoint {:?}: {}", endpoint, e))
        })
    }
}

/// Render a JSON body for logging with every `access_token` value masked.
fn redact_for_log(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(mut value) => {
            redact_tokens(&mut value);
            value.to_string()
        }
        Err(_) => format!("<{} bytes, not JSON>", body.len()),
    }
}

fn redact_tokens(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                if key == "access_token" && v.is_string() {
                    *v = Value::String("<redacted>".to_string());
                } else {
                    redact_tokens(v);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_tokens),
        _ => {}
    }
}
