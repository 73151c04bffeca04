//! Markup Validate
//!
//! Client for a remote markup validation service.
//!
//! This library provides:
//! - Submission of HTML documents to the service
//! - Filtering of reported messages down to hard errors
//! - Source context snippets around each error
//! - Configuration management

pub mod config;
pub mod error;
pub mod service;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use error::{TransportError, ValidationError};
pub use service::{HttpTransport, MessageKind, RawFinding, Transport};
pub use validation::{create_validator, AnnotatedFinding, ContextWindow, IgnoreSet, Validator};
