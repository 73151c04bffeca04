//! Error types for document validation.

use std::fmt::Write as _;

use thiserror::Error;

use crate::validation::AnnotatedFinding;

/// Failures talking to the validation service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request failed before a response arrived (connect, timeout, TLS).
    #[error("request to validation service failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("validation service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// First part of the response body.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Outcome of a failed `validate` call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The document was empty; no request was made.
    #[error("document must be a non-empty string of HTML markup to validate")]
    InvalidInput,

    /// The service could not be reached or its answer could not be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The document has errors that are not in the ignore set.
    #[error("Validation errors: {}", render_findings(.findings))]
    ValidationFailed {
        /// Surviving findings, in service order.
        findings: Vec<AnnotatedFinding>,
    },
}

impl ValidationError {
    /// Findings carried by a `ValidationFailed`, empty for other kinds.
    pub fn findings(&self) -> &[AnnotatedFinding] {
        match self {
            Self::ValidationFailed { findings } => findings,
            Self::InvalidInput | Self::Transport(_) => &[],
        }
    }

    /// Whether the document itself was judged invalid, as opposed to the
    /// call failing.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }
}

/// Render findings as a listing of message + context pairs.
pub fn render_findings(findings: &[AnnotatedFinding]) -> String {
    let mut out = String::new();
    for finding in findings {
        let _ = write!(out, "\n  - error: {}", finding.message);
        match &finding.context {
            Some(context) => {
                let _ = write!(out, "\n    context: {:?}", context);
            }
            None => out.push_str("\n    context: <unavailable>"),
        }
    }
    out
}
