use crate::grid::Cells;
use crate::scoring::format_time;
use crate::session::Phase;
use crate::types::{
    Difficulty, Mode, Pos, Status, UndoLabel, MAX_MINUTE_DIGITS, MAX_SIDE, MIN_MINUTE_DIGITS,
};

/// Read-only copy of a session, taken once per frame for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub side: u8,
    pub cells: Cells,
    pub reachable: [[bool; MAX_SIDE]; MAX_SIDE],
    pub cursor: Option<Pos>,
    pub selection: Option<Pos>,
    pub focused: bool,
    pub grid_active: bool,
    pub phase: Phase,
    pub countdown: u32,
    pub whole_seconds: u64,
    pub moves: u32,
    pub score: i32,
    pub status: Status,
    pub undo_enabled: bool,
    pub hint_enabled: bool,
    pub undo_label: UndoLabel,
    pub placement: Option<usize>,
    pub seed: u64,
}

impl SessionSnapshot {
    pub fn clock(&self) -> String {
        format_time(self.whole_seconds, MIN_MINUTE_DIGITS, MAX_MINUTE_DIGITS)
    }

    /// Clock text for the victory panel (never saturates).
    pub fn final_time(&self) -> String {
        format_time(self.whole_seconds, 1, 15)
    }

    pub fn is_victorious(&self) -> bool {
        self.phase == Phase::Victorious
    }

    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }
}
