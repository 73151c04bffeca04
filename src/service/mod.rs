//! Validation Service
//!
//! Wire model and transport for the remote markup validator.

pub mod schema;
pub mod transport;

pub use schema::{MessageKind, RawFinding, ServiceResponse};
pub use transport::{HttpSettings, HttpTransport, OutputFormat, Transport};
