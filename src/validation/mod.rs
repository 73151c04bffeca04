//! Validation Pipeline
//!
//! Filtering, context extraction and orchestration, kept apart from the
//! transport.

pub mod context;
pub mod engine;
pub mod filter;
pub mod ignore;

pub use context::{extract_context, split_lines, ContextWindow};
pub use engine::{create_validator, AnnotatedFinding, Validator};
pub use filter::keep;
pub use ignore::IgnoreSet;
