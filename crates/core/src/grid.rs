//! Puzzle grid - tiles, cursor, selection, moves, and undo
//!
//! The grid owns the tile matrix and the whole move state machine:
//!
//! - **Cursor**: the cell under the pointer or keyboard highlight
//! - **Selection**: at most one selected tile, with its reachable destinations
//! - **Moves**: swaps between the selection and a reachable tile
//! - **Undo**: a single-step undo/redo of the last swap
//!
//! # Movement rule
//!
//! An even tile moves along its row and column; an odd tile moves along its
//! diagonals. In each direction destinations run outward until the first tile
//! that breaks the chain. A destination must be no larger than the moving
//! tile, and a `1` is only a destination when the moving tile is not the
//! grid's largest value. A `1` can never be selected.
//!
//! Every state change that should reach the status bar is queued as a
//! [`StatusChange`] and collected by the session with
//! [`PuzzleGrid::take_status_change`].

use arrayvec::ArrayVec;
use rand::Rng;

use crate::generate::generate;
use crate::types::{
    Difficulty, Direction, Mode, MoveResult, Pos, Status, StatusMessage, Valence, MAX_SIDE,
};
use crate::victory;

/// Tile values, row-major. Only the top-left `side x side` block is used.
pub type Cells = [[u8; MAX_SIDE]; MAX_SIDE];

/// Upper bound on destinations from one tile: a full row and column, or two
/// full diagonals, of the largest grid.
pub const MAX_REACHABLE: usize = 2 * (MAX_SIDE - 1);

/// Destinations from a single tile.
pub type Reachable = ArrayVec<Pos, MAX_REACHABLE>;

const AXES: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A status bar update raised by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: Status,
    /// What the bar shows once a transient status expires.
    pub default: Status,
    /// Whether `status` should revert to `default` after a short delay.
    pub transient: bool,
}

/// Build a [`Cells`] matrix from explicit rows.
///
/// # Panics
///
/// Panics if the rows are not square or larger than [`MAX_SIDE`].
pub fn cells_from_rows(rows: &[&[u8]]) -> Cells {
    let side = rows.len();
    assert!(side <= MAX_SIDE, "grid side {side} exceeds {MAX_SIDE}");
    let mut cells = [[0; MAX_SIDE]; MAX_SIDE];
    for (r, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), side, "row {r} is not {side} wide");
        cells[r][..side].copy_from_slice(row);
    }
    cells
}

/// Destinations reachable from `from` under the movement rule.
pub fn reachable_from(cells: &Cells, side: usize, highest: u8, from: Pos) -> Reachable {
    let mut out = Reachable::new();
    let source = cells[from.row][from.col];
    if source < 2 {
        return out;
    }
    let directions = if source % 2 == 0 { &AXES } else { &DIAGONALS };
    for &(dr, dc) in directions {
        let mut at = from;
        while let Some(next) = step(at, dr, dc, side) {
            let dest = cells[next.row][next.col];
            if dest > source || (dest <= 1 && source >= highest) {
                break;
            }
            out.push(next);
            at = next;
        }
    }
    out
}

fn step(at: Pos, dr: isize, dc: isize, side: usize) -> Option<Pos> {
    let row = at.row.checked_add_signed(dr)?;
    let col = at.col.checked_add_signed(dc)?;
    (row < side && col < side).then_some(Pos::new(row, col))
}

#[derive(Debug, Clone)]
pub struct PuzzleGrid {
    mode: Mode,
    difficulty: Difficulty,
    cells: Cells,
    reachable: [[bool; MAX_SIDE]; MAX_SIDE],
    highest: u8,
    cursor: Option<Pos>,
    focused: bool,
    selection: Option<Pos>,
    move_count: u32,
    pending_moves: u32,
    last_swap: Option<(Pos, Pos)>,
    undone: bool,
    default_status: Status,
    pending_status: Option<StatusChange>,
    active: bool,
}

impl PuzzleGrid {
    /// Generate a fresh random grid.
    pub fn generate<R: Rng + ?Sized>(mode: Mode, difficulty: Difficulty, rng: &mut R) -> Self {
        Self::from_cells(mode, difficulty, generate(mode, difficulty, rng))
    }

    /// Wrap an existing matrix. The grid starts inactive with no cursor.
    pub fn from_cells(mode: Mode, difficulty: Difficulty, cells: Cells) -> Self {
        let side = difficulty.side();
        let highest = cells[..side]
            .iter()
            .flat_map(|row| row[..side].iter().copied())
            .max()
            .unwrap_or(1)
            .max(1);
        Self {
            mode,
            difficulty,
            cells,
            reachable: [[false; MAX_SIDE]; MAX_SIDE],
            highest,
            cursor: None,
            focused: false,
            selection: None,
            move_count: 0,
            pending_moves: 0,
            last_swap: None,
            undone: false,
            default_status: Status::neutral(StatusMessage::SelectPrompt),
            pending_status: None,
            active: false,
        }
    }

    /// Build a grid from explicit rows (handy for fixed layouts).
    ///
    /// # Panics
    ///
    /// Panics unless the rows form a 4x4, 6x6, 8x8 or 10x10 square.
    pub fn from_rows(mode: Mode, rows: &[&[u8]]) -> Self {
        let difficulty = Difficulty::from_side(rows.len())
            .unwrap_or_else(|| panic!("no difficulty has side {}", rows.len()));
        Self::from_cells(mode, difficulty, cells_from_rows(rows))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn side(&self) -> usize {
        self.difficulty.side()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Tile value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn cell(&self, pos: Pos) -> u8 {
        self.check(pos);
        self.cells[pos.row][pos.col]
    }

    pub fn highest_value(&self) -> u8 {
        self.highest
    }

    pub fn cursor(&self) -> Option<Pos> {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    /// Whether `pos` is a legal destination for the current selection.
    pub fn is_reachable(&self, pos: Pos) -> bool {
        self.check(pos);
        self.reachable[pos.row][pos.col]
    }

    pub(crate) fn reachable_matrix(&self) -> &[[bool; MAX_SIDE]; MAX_SIDE] {
        &self.reachable
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether the last move is currently undone (the next toggle redoes it).
    pub fn is_undone(&self) -> bool {
        self.undone
    }

    pub fn is_victorious(&self) -> bool {
        victory::is_victorious(self.mode, &self.cells, self.side())
    }

    /// Enable or disable moves. Enabling prompts the player to pick a tile.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.notify(
                Status::neutral(StatusMessage::SelectPrompt),
                Some(Status::neutral(StatusMessage::SelectPrompt)),
                false,
            );
        }
    }

    /// Moves made since the last call.
    pub fn take_pending_moves(&mut self) -> u32 {
        std::mem::take(&mut self.pending_moves)
    }

    /// The status update raised since the last call, if any.
    pub fn take_status_change(&mut self) -> Option<StatusChange> {
        self.pending_status.take()
    }

    /// Point at a cell (or at nothing). Positions outside the grid count as nothing.
    pub fn point_at(&mut self, pos: Option<Pos>) {
        let side = self.side();
        self.cursor = pos.filter(|p| p.row < side && p.col < side);
        self.focused = self.cursor.is_some();
    }

    /// Move the cursor by `amount` cells, clamped to the grid edge.
    ///
    /// With no cursor yet, the cursor lands on the top-left cell.
    /// Returns whether the cursor changed.
    pub fn move_cursor(&mut self, direction: Direction, amount: usize) -> bool {
        let last = self.side() - 1;
        let before = self.cursor;
        let next = match self.cursor {
            None => Pos::new(0, 0),
            Some(Pos { row, col }) => match direction {
                Direction::Up => Pos::new(row.saturating_sub(amount), col),
                Direction::Down => Pos::new(row.saturating_add(amount).min(last), col),
                Direction::Left => Pos::new(row, col.saturating_sub(amount)),
                Direction::Right => Pos::new(row, col.saturating_add(amount).min(last)),
            },
        };
        self.cursor = Some(next);
        self.focused = true;
        before != self.cursor
    }

    /// Confirm input: select the tile under the cursor, or move the selected
    /// tile onto it.
    pub fn select_or_swap(&mut self) -> MoveResult {
        if !self.active {
            return MoveResult::Irrelevant;
        }
        let Some(cursor) = self.cursor else {
            return MoveResult::Irrelevant;
        };
        match self.selection {
            None => self.select(cursor),
            Some(selected) => self.swap_into(selected, cursor),
        }
    }

    /// Cancel input: drop the current selection.
    pub fn deselect(&mut self) -> MoveResult {
        if !self.active || self.selection.is_none() {
            return MoveResult::Irrelevant;
        }
        self.clear_selection();
        self.notify(
            Status::neutral(StatusMessage::SelectPrompt),
            Some(Status::neutral(StatusMessage::SelectPrompt)),
            false,
        );
        MoveResult::Success
    }

    /// Undo the last move, or redo it if it is currently undone.
    ///
    /// Irrelevant while inactive, mid-selection, or before the first move.
    pub fn toggle_undo(&mut self) -> MoveResult {
        if !self.active || self.selection.is_some() {
            return MoveResult::Irrelevant;
        }
        let Some((a, b)) = self.last_swap else {
            return MoveResult::Irrelevant;
        };
        self.swap(a, b);
        let message = if self.undone {
            self.move_count += 1;
            StatusMessage::MoveRedone
        } else {
            self.move_count -= 1;
            StatusMessage::MoveUndone
        };
        self.undone = !self.undone;
        log::debug!("{:?}: {:?} <-> {:?}", message, a, b);
        self.notify(Status::neutral(message), None, true);
        MoveResult::Success
    }

    /// All destinations of the current selection.
    pub fn reachable_cells(&self) -> Reachable {
        match self.selection {
            Some(from) => reachable_from(&self.cells, self.side(), self.highest, from),
            None => Reachable::new(),
        }
    }

    fn select(&mut self, at: Pos) -> MoveResult {
        if self.cell(at) < 2 {
            self.notify(
                Status::new(StatusMessage::CannotSelectOne, Valence::Negative),
                Some(Status::neutral(StatusMessage::SelectPrompt)),
                true,
            );
            return MoveResult::Failure;
        }

        let destinations = reachable_from(&self.cells, self.side(), self.highest, at);
        if destinations.is_empty() {
            self.notify(
                Status::new(StatusMessage::Unmovable, Valence::Negative),
                None,
                true,
            );
            return MoveResult::Failure;
        }

        for pos in &destinations {
            self.reachable[pos.row][pos.col] = true;
        }
        self.selection = Some(at);
        self.notify(
            Status::neutral(StatusMessage::MovePrompt),
            Some(Status::neutral(StatusMessage::MovePrompt)),
            false,
        );
        MoveResult::Success
    }

    fn swap_into(&mut self, selected: Pos, target: Pos) -> MoveResult {
        if !self.reachable[target.row][target.col] {
            self.notify(
                Status::new(StatusMessage::InvalidMove, Valence::Negative),
                None,
                true,
            );
            return MoveResult::Failure;
        }

        self.swap(target, selected);
        self.clear_selection();
        self.move_count += 1;
        self.pending_moves += 1;
        self.undone = false;
        self.last_swap = Some((target, selected));
        log::debug!("move {}: {:?} <-> {:?}", self.move_count, selected, target);
        self.notify(
            Status::new(StatusMessage::PieceMoved, Valence::Positive),
            Some(Status::neutral(StatusMessage::SelectPrompt)),
            true,
        );
        MoveResult::Success
    }

    fn swap(&mut self, a: Pos, b: Pos) {
        let tmp = self.cells[a.row][a.col];
        self.cells[a.row][a.col] = self.cells[b.row][b.col];
        self.cells[b.row][b.col] = tmp;
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.reachable = [[false; MAX_SIDE]; MAX_SIDE];
    }

    fn notify(&mut self, status: Status, default: Option<Status>, transient: bool) {
        if let Some(default) = default {
            self.default_status = default;
        }
        self.pending_status = Some(StatusChange {
            status,
            default: self.default_status,
            transient,
        });
    }

    fn check(&self, pos: Pos) {
        let side = self.side();
        assert!(
            pos.row < side && pos.col < side,
            "{pos:?} outside {side}x{side} grid"
        );
    }
}
