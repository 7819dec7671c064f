//! Upstream assistant abstraction for the registration service.
//!
//! The slot-filling handler never talks to a language model directly; it goes
//! through the [`Assistant`] trait so tests can script replies. The production
//! implementation, [`OpenAiAssistant`], calls an OpenAI-compatible
//! `chat/completions` endpoint.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::observability::{UPSTREAM_ERRORS, UPSTREAM_REQUESTS};
use crate::types::{CompletionMessage, CompletionRequest, CompletionResponse};

/// Default base URL of the upstream completion API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/";

/// Default model for registration conversations.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A source of assistant replies for the registration conversation.
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Produce one assistant reply for the given system prompt and user
    /// message.
    async fn reply(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

/// Assistant backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiAssistant {
    api_key: String,
    client: ReqwestClient,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiAssistant {
    /// Create a new assistant client.
    ///
    /// The API key can be provided directly or read from the ENLIST_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None, None)
    }

    /// Create a new assistant client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var("ENLIST_API_KEY").map_err(|_| {
                Error::authentication(
                    "API key not provided and ENLIST_API_KEY environment variable not set",
                )
            })?,
        };

        let base_url = base_url.unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        url::Url::parse(&base_url)?;

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
            api_key,
            client,
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: DEFAULT_TEMPERATURE,
            timeout,
        })
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Create and return default headers for upstream requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::authentication("API key contains invalid header characters"))?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Process upstream response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        match status_code {
            400 => Error::bad_request(error_body, None),
            401 => Error::authentication(error_body),
            408 => Error::timeout(error_body, None),
            429 => Error::rate_limit(error_body, retry_after),
            500 => Error::internal_server(error_body),
            502..=504 => Error::service_unavailable(error_body, retry_after),
            _ => Error::api(status_code, error_body),
        }
    }
}

#[async_trait::async_trait]
impl Assistant for OpenAiAssistant {
    async fn reply(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}chat/completions", self.base_url);
        let params = CompletionRequest::new(
            self.model.clone(),
            vec![
                CompletionMessage::system(system_prompt),
                CompletionMessage::user(user_message),
            ],
            self.temperature,
        );
        UPSTREAM_REQUESTS.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                UPSTREAM_ERRORS.click();
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
            UPSTREAM_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        let completion = response.json::<CompletionResponse>().await.map_err(|e| {
            UPSTREAM_ERRORS.click();
            Error::serialization(
                format!("Failed to parse completion: {}", e),
                Some(Box::new(e)),
            )
        })?;

        completion.into_first_content().ok_or_else(|| {
            UPSTREAM_ERRORS.click();
            Error::serialization("Completion contained no choices", None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_creation() {
        let assistant = OpenAiAssistant::new(Some("test-key".to_string())).unwrap();
        assert_eq!(assistant.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(assistant.model(), DEFAULT_MODEL);
        assert_eq!(assistant.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn assistant_custom_options() {
        let assistant = OpenAiAssistant::with_options(
            Some("test-key".to_string()),
            Some("http://localhost:11434/v1/".to_string()),
            Some("llama3".to_string()),
            Some(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(assistant.base_url, "http://localhost:11434/v1/");
        assert_eq!(assistant.model(), "llama3");
        assert_eq!(assistant.timeout, Duration::from_secs(10));
    }

    #[test]
    fn bearer_header_built_from_key() {
        let assistant = OpenAiAssistant::new(Some("test-key".to_string())).unwrap();
        let headers = assistant.default_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer test-key"
        );
    }
}
