//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (puzzle logic, score persistence, terminal rendering).
//!
//! # Grid Dimensions
//!
//! The grid is always square. Its side length is picked by [`Difficulty`]:
//!
//! | Difficulty | Side | Values |
//! |------------|------|--------|
//! | Easy | 4 | 1-4 |
//! | Medium | 6 | 1-6 |
//! | Hard | 8 | 1-8 |
//! | Master | 10 | 1-10 |
//!
//! Each value may appear at most `side` times in a grid.
//!
//! # Timing Constants
//!
//! Durations are in seconds (the session steps with `f64` deltas):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GAME_START_DELAY_SECS` | 4.0 | Countdown before the grid accepts moves |
//! | `STATUS_LINGER_SECS` | 3.0 | Lifetime of a transient status message |
//!
//! `TICK_MS` is the default fixed step of the terminal loop.
//!
//! # Examples
//!
//! ```
//! use numerate_types::{Difficulty, Mode};
//!
//! let mode = Mode::from_str("scatter").unwrap();
//! assert_eq!(mode, Mode::Scatter);
//!
//! assert_eq!(Difficulty::Hard.side(), 8);
//! assert_eq!(Difficulty::from_side(6), Some(Difficulty::Medium));
//! ```

/// Largest supported grid side (Master difficulty).
pub const MAX_SIDE: usize = 10;

/// Default fixed timestep of the terminal loop in milliseconds (100 steps per second).
pub const TICK_MS: u32 = 10;

/// Countdown before the grid becomes active.
pub const GAME_START_DELAY_SECS: f64 = 4.0;

/// How long a transient status message stays up before reverting to the default.
pub const STATUS_LINGER_SECS: f64 = 3.0;

/// Score lost for every whole second of play.
pub const SECOND_PENALTY: i32 = 3;

/// Score lost for every move made.
pub const MOVE_PENALTY: i32 = 13;

/// Starting score by difficulty index (Easy, Medium, Hard, Master).
pub const STARTING_SCORES: [i32; 4] = [50_000, 96_000, 145_000, 210_000];

/// Minimum number of minute digits shown on the in-game clock.
pub const MIN_MINUTE_DIGITS: usize = 2;

/// Maximum number of minute digits shown before the clock saturates.
pub const MAX_MINUTE_DIGITS: usize = 3;

/// How many times generation re-draws a value to avoid an equal neighbour.
pub const PLACEMENT_RETRY_ATTEMPTS: u32 = 2;

/// Initial chance (Scatter generation) that a tile copies a neighbour.
pub const REPEAT_TILE_CHANCE: f64 = 0.15;

/// Factor applied to the repeat chance after every successful copy.
pub const REPEAT_TILE_MULTIPLIER: f64 = 0.8;

/// Entries kept per difficulty in the high score table.
pub const SCORES_PER_LIST: usize = 5;

/// Longest player name stored in the high score table (UTF-16 code units).
pub const MAX_NAME_LENGTH: usize = 15;

/// Game modes. Each one selects a victory predicate and a generation bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Rows or columns filled with a single ascending/descending value.
    #[default]
    LineUp,
    /// Rows or columns alternating between two values.
    Alternate,
    /// No two axis-adjacent tiles share a value.
    Scatter,
    /// Every row and column holds each value once.
    Summation,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::LineUp, Mode::Alternate, Mode::Scatter, Mode::Summation];

    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use numerate_types::Mode;
    ///
    /// assert_eq!(Mode::from_str("lineup"), Some(Mode::LineUp));
    /// assert_eq!(Mode::from_str("Line-Up"), Some(Mode::LineUp));
    /// assert_eq!(Mode::from_str("SUMMATION"), Some(Mode::Summation));
    /// assert_eq!(Mode::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lineup" | "line-up" => Some(Mode::LineUp),
            "alternate" | "alternation" => Some(Mode::Alternate),
            "scatter" => Some(Mode::Scatter),
            "summation" => Some(Mode::Summation),
            _ => None,
        }
    }

    /// Convert to camelCase string (settings file representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::LineUp => "lineUp",
            Mode::Alternate => "alternate",
            Mode::Scatter => "scatter",
            Mode::Summation => "summation",
        }
    }

    /// Human-readable name shown in menus.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::LineUp => "Line-Up",
            Mode::Alternate => "Alternation",
            Mode::Scatter => "Scatter",
            Mode::Summation => "Summation",
        }
    }

    /// One-line goal description shown under the mode menu.
    pub fn goal(&self) -> &'static str {
        match self {
            Mode::LineUp => {
                "Line up tiles so every row or every column has one number, ascending or descending."
            }
            Mode::Alternate => {
                "Line up tiles so every row or every column alternates between two numbers."
            }
            Mode::Scatter => "Arrange the tiles so no number touches the same number.",
            Mode::Summation => "Line up tiles so every row and column has every number in the grid.",
        }
    }
}

/// Grid size. Also selects the high score bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Master,
    ];

    /// Grid side length (and highest tile value).
    pub fn side(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
            Difficulty::Master => 10,
        }
    }

    /// Position in [`Difficulty::ALL`]; used to index score tables.
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Master => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_side(side: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.side() == side)
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (4x4 grid)",
            Difficulty::Medium => "Medium (6x6 grid)",
            Difficulty::Hard => "Hard (8x8 grid)",
            Difficulty::Master => "Master (10x10 grid)",
        }
    }

    /// Name used in score tables.
    pub fn short_label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Master => "Master",
        }
    }
}

/// A cell coordinate (row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Outcome of a grid operation.
///
/// - **Success**: state changed as requested
/// - **Failure**: rejected; a negative notification was raised
/// - **Irrelevant**: nothing to do (grid inactive, no cursor, nothing selected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Success,
    Failure,
    Irrelevant,
}

/// Tone of a status message; drives the status bar colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Valence {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Status bar messages raised by the grid and the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusMessage {
    #[default]
    Waiting,
    SelectPrompt,
    MovePrompt,
    PieceMoved,
    CannotSelectOne,
    Unmovable,
    InvalidMove,
    MoveUndone,
    MoveRedone,
    Victory,
}

impl StatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            StatusMessage::Waiting => "Waiting for game to begin...",
            StatusMessage::SelectPrompt => "Move over a piece and select it to move it.",
            StatusMessage::MovePrompt => {
                "Move over a highlighted piece and select it to move the currently selected piece."
            }
            StatusMessage::PieceMoved => "Piece moved!",
            StatusMessage::CannotSelectOne => "You cannot select a 1 to move.",
            StatusMessage::Unmovable => {
                "You cannot move this piece - every surrounding piece is larger."
            }
            StatusMessage::InvalidMove => "You cannot move outside of the highlighted pieces.",
            StatusMessage::MoveUndone => "Previous move undone.",
            StatusMessage::MoveRedone => "Previous move redone.",
            StatusMessage::Victory => "You win!",
        }
    }
}

/// A status message together with its tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    pub message: StatusMessage,
    pub valence: Valence,
}

impl Status {
    pub const fn new(message: StatusMessage, valence: Valence) -> Self {
        Self { message, valence }
    }

    pub const fn neutral(message: StatusMessage) -> Self {
        Self::new(message, Valence::Neutral)
    }
}

/// Which way the undo control currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UndoLabel {
    #[default]
    Undo,
    Redo,
}

impl UndoLabel {
    pub fn text(&self) -> &'static str {
        match self {
            UndoLabel::Undo => "Undo",
            UndoLabel::Redo => "Redo",
        }
    }
}

/// Actions a player can apply to a running session.
///
/// These are produced by the terminal input mapping and consumed by the app
/// shell, which forwards them to the session or the active menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell (or menu item) in a direction
    Cursor(Direction),
    /// Select the tile under the cursor, or swap with it
    Confirm,
    /// Drop the current selection (or leave the screen)
    Cancel,
    /// Undo the last move, or redo it if it was just undone
    ToggleUndo,
}
