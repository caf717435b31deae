use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::ScoreLedger;

/// Failures while loading or saving a high score file.
///
/// None of these are fatal to gameplay: callers fall back to an empty (or
/// partially loaded) ledger and keep going.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("score file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("score file could not be read: {source}")]
    Unreadable {
        #[source]
        source: io::Error,
    },

    #[error("score file could not be written: {source}")]
    Unwritable {
        #[source]
        source: io::Error,
    },

    /// The header did not match or a record was cut short. Whatever loaded
    /// cleanly before the damage is kept in `partial`.
    #[error("score file is corrupt: {reason}")]
    Corrupt {
        reason: &'static str,
        partial: Box<ScoreLedger>,
    },
}

impl LedgerError {
    /// The ledger to continue with after this error.
    pub fn into_partial(self) -> ScoreLedger {
        match self {
            LedgerError::Corrupt { partial, .. } => *partial,
            _ => ScoreLedger::default(),
        }
    }
}
