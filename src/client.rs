use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_EXCHANGES, CLIENT_EXCHANGE_ERRORS};
use crate::types::{ChatReply, ChatRequest};

/// Default base URL of the registration service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the registration service's `/chat` endpoint.
///
/// This is the transport half of the chat client: it owns the HTTP
/// connection and translates transport failures into [`Error`] values; it
/// holds no conversation state. Session identity is implicit in the server
/// connection, so no identifier is sent.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl ChatClient {
    /// Create a new client for the given base URL.
    ///
    /// `None` falls back to [`DEFAULT_BASE_URL`].
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The service reports handler failures as {"error": "..."}.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(error_message, None),
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, error_message),
        }
    }

    /// Send one user message and return the parsed reply.
    ///
    /// This is the entire wire contract: `POST {base}chat` with
    /// `{"message": ...}` and a [`ChatReply`] body in return.
    pub async fn send(&self, message: &str) -> Result<ChatReply> {
        let url = format!("{}chat", self.base_url);
        CLIENT_EXCHANGES.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| {
                CLIENT_EXCHANGE_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            CLIENT_EXCHANGE_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatReply>().await.map_err(|e| {
            CLIENT_EXCHANGE_ERRORS.click();
            Error::serialization(
                format!("Failed to parse reply: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

/// Validate a base URL and ensure it ends with a single trailing slash.
fn normalize_base_url(base_url: String) -> Result<String> {
    url::Url::parse(&base_url)?;
    if base_url.ends_with('/') {
        Ok(base_url)
    } else {
        Ok(format!("{}/", base_url))
    }
}
