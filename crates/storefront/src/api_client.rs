//! JSON client for the pharmacy backend API.
//!
//! None of the storefront flows call the backend yet; the client is kept
//! ready with the request policy the backend expects: a 15 second timeout,
//! JSON headers, two retries on 408/500 responses, and `price` fields coerced
//! to numbers on the way in.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Retries after the first attempt.
pub const MAX_RETRIES: u32 = 2;

/// Errors returned by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid API path {path}: {source}")]
    InvalidPath {
        path: String,
        source: url::ParseError,
    },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the backend JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the (price-coerced) body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status after
    /// retries, or a body that does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST `body` to `path` and decode the (price-coerced) response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], plus a body that cannot be encoded.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::POST, path, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request, retrying retryable statuses.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let mut attempt = 0;

        loop {
            let mut request = self.client.request(method.clone(), url.clone());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                let bytes = response.bytes().await?;
                if bytes.is_empty() {
                    return Ok(Value::Null);
                }
                let mut value: Value = serde_json::from_slice(&bytes)?;
                coerce_prices(&mut value);
                return Ok(value);
            }

            if is_retryable(status) && attempt < MAX_RETRIES {
                attempt += 1;
                debug!(%status, attempt, "Retrying API request");
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            warn!(%status, "API request failed");
            return Err(ApiError::Status { status, body });
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ApiError::InvalidPath {
            path: path.to_string(),
            source,
        })
    }
}

const fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::INTERNAL_SERVER_ERROR
    )
}

/// Rewrite string `price` fields as numbers.
///
/// Applies to the top-level object, or to each object of a top-level array.
/// Values that do not parse are left alone.
pub fn coerce_prices(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(coerce_price_field),
        Value::Object(_) => coerce_price_field(value),
        _ => {}
    }
}

fn coerce_price_field(value: &mut Value) {
    let Some(price) = value.get_mut("price") else {
        return;
    };
    let parsed = price
        .as_str()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .and_then(serde_json::Number::from_f64);
    if let Some(number) = parsed {
        *price = Value::Number(number);
    }
}
