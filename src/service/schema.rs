//! Service Schema Types
//!
//! Serde model of the validation service's JSON output.

use serde::{Deserialize, Deserializer};

/// Root of a JSON response from the validation service
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServiceResponse {
    #[serde(default)]
    pub messages: Vec<RawFinding>,
}

/// Kind of a reported message. Only `Error` is a hard error.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    Error,
    Info,
    NonDocumentError,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One issue as reported by the service
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawFinding {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: MessageKind,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_position")]
    pub first_line: Option<usize>,
    #[serde(default, deserialize_with = "lenient_position")]
    pub first_column: Option<usize>,
    /// 1-based line of the element's closing construct
    #[serde(default, deserialize_with = "lenient_position")]
    pub last_line: Option<usize>,
    /// 1-based column on `last_line`
    #[serde(default, deserialize_with = "lenient_position")]
    pub last_column: Option<usize>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl RawFinding {
    /// Build a finding with just the fields the pipeline looks at
    pub fn new(
        kind: MessageKind,
        message: impl Into<String>,
        last_line: Option<usize>,
        last_column: Option<usize>,
    ) -> Self {
        Self {
            kind,
            sub_type: None,
            message: message.into(),
            first_line: None,
            first_column: None,
            last_line,
            last_column,
            extract: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Positions arrive as numbers from some deployments and strings from others.
/// Anything that isn't a non-negative integer maps to `None`.
fn lenient_position<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Position {
        Number(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let position = Option::<Position>::deserialize(deserializer)?;
    Ok(match position {
        Some(Position::Number(n)) => usize::try_from(n).ok(),
        Some(Position::Text(s)) => leading_integer(&s),
        Some(Position::Other(_)) | None => None,
    })
}

/// `null` reads as the type's default instead of failing the whole response.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the leading decimal digits of `s`, ignoring leading whitespace.
fn leading_integer(s: &str) -> Option<usize> {
    let trimmed = s.trim_start();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}
