//! Context Extractor
//!
//! Cuts a short snippet of source around a reported position.
//!
//! The service reports `lastLine`/`lastColumn` at the closing construct of
//! the offending element. The snippet is anchored on the nearest `<` at or
//! before that column, with a fixed lead-in and tail around it. Positions are
//! counted in characters, not bytes.

use crate::service::RawFinding;

/// Characters kept before the anchoring `<`.
pub const DEFAULT_LEAD: usize = 20;
/// Characters kept after the reported column.
pub const DEFAULT_TRAIL: usize = 40;
/// Subtracted from `lastLine` to get a zero-based line index.
pub const DEFAULT_LINE_OFFSET: usize = 1;

/// Shape of the snippet cut around a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    /// Subtracted from `lastLine` to index the source lines
    pub line_offset: usize,
    /// Characters kept before the anchoring `<`
    pub lead: usize,
    /// Characters kept after the reported column
    pub trail: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            line_offset: DEFAULT_LINE_OFFSET,
            lead: DEFAULT_LEAD,
            trail: DEFAULT_TRAIL,
        }
    }
}

impl ContextWindow {
    /// Snippet of `lines` around `finding`, or `None` when the position
    /// cannot be resolved (missing or out-of-range line, empty line, no `<`
    /// at or before the column).
    pub fn extract(&self, lines: &[&str], finding: &RawFinding) -> Option<String> {
        let line_index = finding.last_line?.checked_sub(self.line_offset)?;
        let line = lines.get(line_index)?;
        let col = finding.last_column?;

        let chars: Vec<char> = line.chars().collect();
        let last = chars.len().checked_sub(1)?;

        // inclusive search ceiling
        let from = col.saturating_sub(1).min(last);
        let start = chars[..=from].iter().rposition(|&c| c == '<')?;

        let begin = start.saturating_sub(self.lead);
        let span = col.saturating_sub(start).saturating_add(self.trail);
        let end = begin.saturating_add(span).min(chars.len());

        log::trace!(
            "Context for line {} col {}: chars {}..{}",
            line_index + 1,
            col,
            begin,
            end
        );
        Some(chars[begin..end].iter().collect())
    }
}

/// Split a document into lines the way positions are counted by the service.
/// A trailing `\r` stays on its line.
pub fn split_lines(document: &str) -> Vec<&str> {
    document.split('\n').collect()
}

/// Extract with the default window
pub fn extract_context(lines: &[&str], finding: &RawFinding) -> Option<String> {
    ContextWindow::default().extract(lines, finding)
}
