//! Transport
//!
//! Sends a document to the validation service and hands back the raw body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};

use crate::error::TransportError;

/// Default endpoint of the validation service.
pub const DEFAULT_ENDPOINT: &str = "http://validator.w3.org/check";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("markup-validate/", env!("CARGO_PKG_VERSION"));

/// Longest prefix of an error body kept in `TransportError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

/// Output format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
        }
    }
}

/// One request, one response. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit `document` and return the response body.
    async fn submit(&self, document: &str, format: OutputFormat) -> Result<String, TransportError>;
}

/// Settings for [`HttpTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// URL the form is posted to
    pub endpoint: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Option<Duration>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Multipart POST transport over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(settings: HttpSettings) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| TransportError::Client(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, document: &str, format: OutputFormat) -> Result<String, TransportError> {
        let upload = Part::text(document.to_owned())
            .file_name("document.html")
            .mime_str("text/html")?;
        let form = Form::new()
            .text("output", format.as_str())
            .part("uploaded_file", upload);

        log::debug!("Submitting {} bytes to {}", document.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        log::debug!("Service answered {} with {} bytes", status, body.len());
        Ok(body)
    }
}
