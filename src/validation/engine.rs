//! Validation Engine
//!
//! Ties the service round-trip to filtering and context extraction.

use super::context::{split_lines, ContextWindow};
use super::filter::keep;
use super::ignore::IgnoreSet;
use crate::config::Config;
use crate::error::{TransportError, ValidationError};
use crate::service::{
    HttpSettings, HttpTransport, OutputFormat, RawFinding, ServiceResponse, Transport,
};

/// A reported error that survived filtering, with source context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedFinding {
    pub message: String,
    /// Snippet around the reported position, if it could be resolved
    pub context: Option<String>,
    /// `lastLine` as reported
    pub line: Option<usize>,
    /// `lastColumn` as reported
    pub column: Option<usize>,
}

/// Validates documents against a remote service.
///
/// Holds no mutable state, so one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Validator<T = HttpTransport> {
    ignore: IgnoreSet,
    window: ContextWindow,
    transport: T,
}

/// Create a validator for the default endpoint
pub fn create_validator<I, S>(ignore: I) -> Result<Validator, TransportError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let transport = HttpTransport::new(HttpSettings::default())?;
    Ok(Validator::with_transport(IgnoreSet::new(ignore), transport))
}

impl Validator {
    /// Validator for the default endpoint with nothing ignored
    pub fn new() -> Result<Self, TransportError> {
        create_validator(Vec::<String>::new())
    }

    /// Validator built from merged configuration
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.http_settings())?;
        Ok(Validator::with_transport(config.ignore.clone(), transport)
            .with_window(config.window))
    }
}

impl<T: Transport> Validator<T> {
    pub fn with_transport(ignore: IgnoreSet, transport: T) -> Self {
        Self {
            ignore,
            window: ContextWindow::default(),
            transport,
        }
    }

    /// Replace the context window
    pub fn with_window(mut self, window: ContextWindow) -> Self {
        self.window = window;
        self
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    pub fn window(&self) -> ContextWindow {
        self.window
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `document`, failing with the surviving findings if any
    pub async fn validate(&self, document: &str) -> Result<(), ValidationError> {
        let findings = self.check(document).await?;
        if findings.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed { findings })
        }
    }

    /// Validate `document` and return the surviving findings (empty = pass)
    pub async fn check(&self, document: &str) -> Result<Vec<AnnotatedFinding>, ValidationError> {
        if document.is_empty() {
            return Err(ValidationError::InvalidInput);
        }

        let body = self.transport.submit(document, OutputFormat::Json).await?;
        let response: ServiceResponse =
            serde_json::from_str(&body).map_err(TransportError::from)?;

        let findings = self.interpret(document, &response.messages);
        log::debug!(
            "Service reported {} messages, {} errors kept",
            response.messages.len(),
            findings.len()
        );
        Ok(findings)
    }

    /// Filter and annotate `messages` against `document`, without any I/O
    pub fn interpret(&self, document: &str, messages: &[RawFinding]) -> Vec<AnnotatedFinding> {
        let lines = split_lines(document);
        messages
            .iter()
            .filter(|finding| keep(finding, &self.ignore))
            .map(|finding| AnnotatedFinding {
                message: finding.message.clone(),
                context: self.window.extract(&lines, finding),
                line: finding.last_line,
                column: finding.last_column,
            })
            .collect()
    }
}
