//! High score persistence.
//!
//! A [`ScoreLedger`] keeps one ranked list per [`Difficulty`](types::Difficulty)
//! and reads/writes the game's binary score file. Every stored score carries
//! two checksums; records that fail them are dropped on load, so editing the
//! file by hand only loses the edited rows.
//!
//! # Example
//!
//! ```
//! use numerate_scores::ScoreLedger;
//! use numerate_scores::types::Difficulty;
//!
//! let mut ledger = ScoreLedger::new();
//! assert_eq!(ledger.placement(Difficulty::Easy, 41_000), Some(1));
//! ledger.insert(Difficulty::Easy, "ada", 41_000);
//!
//! let bytes = ledger.encode();
//! let loaded = ScoreLedger::decode(&bytes).unwrap();
//! assert_eq!(loaded.entries(Difficulty::Easy)[0].name, "ada");
//! ```

pub mod checksum;
mod codec;
pub mod error;
pub mod ledger;

pub use numerate_types as types;

pub use error::LedgerError;
pub use ledger::{ScoreEntry, ScoreLedger};
