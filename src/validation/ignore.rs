//! Ignore Set
//!
//! Messages the caller has accepted and does not want reported.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Immutable set of message strings, matched exactly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    messages: HashSet<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Load one message per line, skipping blank lines
    pub fn from_file(path: &Path) -> Result<Self> {
        load_messages(path).map(Self::new)
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains(message)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Read an ignore file: one message per line, blank lines skipped
pub fn load_messages(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ignore file {}", path.display()))?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}
