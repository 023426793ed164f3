//! Command implementations.

pub mod extract;
pub mod htmloverview;

pub use self::extract::{execute_extract, run_extraction};
pub use self::htmloverview::execute_htmloverview;

use crate::output::Formatter;
use std::path::Path;
use tracing::warn;

/// Existing outputs are never overwritten. Returns `true` when the command
/// should stop without doing any work.
pub(crate) fn skip_existing_output(output: &Path, formatter: &Formatter) -> bool {
    if !output.exists() {
        return false;
    }
    warn!("Output file already exists: {}", output.display());
    eprintln!(
        "{}",
        formatter.warning(&format!("Output file already exists, skipping: {}", output.display()))
    );
    true
}
