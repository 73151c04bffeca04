//! Issue Filter

use super::ignore::IgnoreSet;
use crate::service::RawFinding;

/// Keep hard errors whose message is not ignored. Warnings and info
/// messages never survive, whatever the ignore set holds.
pub fn keep(finding: &RawFinding, ignore: &IgnoreSet) -> bool {
    finding.is_error() && !ignore.contains(&finding.message)
}
