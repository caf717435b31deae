//! Ranked high score lists, one per difficulty.

use std::fs;
use std::io;
use std::path::Path;

use crate::codec;
use crate::error::LedgerError;
use crate::types::{Difficulty, MAX_NAME_LENGTH, SCORES_PER_LIST};

/// One row of a high score list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i32,
}

impl ScoreEntry {
    /// Build an entry, clamping the name to what the file format can hold.
    pub fn new(name: &str, score: i32) -> Self {
        Self {
            name: clamp_name(name),
            score,
        }
    }
}

/// High score table: four descending lists of at most [`SCORES_PER_LIST`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    buckets: [Vec<ScoreEntry>; 4],
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        &self.buckets[difficulty.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// 1-based rank `score` would take in the list for `difficulty`, or
    /// `None` when it would not make the list.
    ///
    /// Ties go below existing entries.
    pub fn placement(&self, difficulty: Difficulty, score: i32) -> Option<usize> {
        let list = &self.buckets[difficulty.index()];
        match list.iter().position(|e| e.score < score) {
            Some(i) => Some(i + 1),
            None if list.len() < SCORES_PER_LIST => Some(list.len() + 1),
            None => None,
        }
    }

    /// Insert a score at its placement, dropping whatever falls off the end.
    ///
    /// Returns the placement, or `None` (and leaves the list untouched) when
    /// the score does not qualify.
    pub fn insert(&mut self, difficulty: Difficulty, name: &str, score: i32) -> Option<usize> {
        let rank = self.placement(difficulty, score)?;
        let list = &mut self.buckets[difficulty.index()];
        list.insert(rank - 1, ScoreEntry::new(name, score));
        list.truncate(SCORES_PER_LIST);
        log::info!(
            "recorded score {} for {:?} at #{} ({})",
            score,
            difficulty,
            rank,
            list[rank - 1].name
        );
        Some(rank)
    }

    /// Append an entry read from disk. Lists that are already full ignore it.
    pub(crate) fn push_loaded(&mut self, difficulty: Difficulty, entry: ScoreEntry) {
        let list = &mut self.buckets[difficulty.index()];
        if list.len() < SCORES_PER_LIST {
            list.push(entry);
        }
    }

    /// Serialize into the on-disk format.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Parse the on-disk format.
    ///
    /// Records whose checksums fail are dropped without error.
    pub fn decode(bytes: &[u8]) -> Result<Self, LedgerError> {
        codec::decode(bytes)
    }

    /// Load a score file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LedgerError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LedgerError::Unreadable { source },
        })?;
        let ledger = Self::decode(&bytes)?;
        log::info!("loaded high scores from {}", path.display());
        Ok(ledger)
    }

    /// Write the whole table to `path`, replacing any previous file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LedgerError> {
        let path = path.as_ref();
        fs::write(path, self.encode()).map_err(|source| LedgerError::Unwritable { source })?;
        log::info!("saved high scores to {}", path.display());
        Ok(())
    }
}

fn clamp_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut units = 0;
    for ch in name.chars().filter(|c| *c != '\0') {
        let n = ch.len_utf16();
        if units + n > MAX_NAME_LENGTH {
            break;
        }
        units += n;
        out.push(ch);
    }
    out
}
