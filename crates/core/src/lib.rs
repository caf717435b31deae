//! Core puzzle logic module - pure, deterministic, and testable
//!
//! This module contains the puzzle rules, the session state machine, and
//! scoring. It has **no dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same grid
//! - **Testable**: fixed grids can be built directly from rows
//! - **Portable**: can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`generate`]: random grid generation per mode
//! - [`grid`]: tiles, cursor, selection, reachability, swaps, undo/redo
//! - [`victory`]: the four win conditions
//! - [`session`]: countdown, clock, decaying score, status bar, victory
//! - [`scoring`]: starting scores, penalties, clock formatting
//! - [`timer`]: polled stopwatch used by the session
//! - [`snapshot`]: render-ready copy of a session
//!
//! # Game Rules
//!
//! - **Selection**: a `1` can never be selected
//! - **Movement**: even tiles move along rows/columns, odd tiles along diagonals
//! - **Destinations**: no larger than the moving tile; a `1` only when the
//!   moving tile is not the grid maximum
//! - **Scoring**: starts from a per-difficulty table, loses 3 per second and
//!   13 per move, never below zero
//! - **Undo**: one level, toggling between undo and redo
//!
//! # Example
//!
//! ```
//! use numerate_core::{Phase, PuzzleSession};
//! use numerate_core::types::{Difficulty, Mode};
//! use numerate_scores::ScoreLedger;
//!
//! let ledger = ScoreLedger::new();
//! let mut session = PuzzleSession::new(Mode::LineUp, Difficulty::Easy, 12345);
//! assert_eq!(session.phase(), Phase::Starting);
//!
//! // Run past the start countdown at 100 steps per second.
//! for _ in 0..410 {
//!     session.elapse_time(0.01, &ledger);
//! }
//! assert_eq!(session.phase(), Phase::Playing);
//! assert!(session.score() <= 50_000);
//! ```
//!
//! # Timing
//!
//! [`PuzzleSession::elapse_time`](session::PuzzleSession::elapse_time) takes
//! the step length in seconds. Whole seconds are charged as they are crossed;
//! moves are charged once per step.

pub mod generate;
pub mod grid;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;
pub mod victory;

pub use numerate_types as types;

pub use grid::{cells_from_rows, reachable_from, Cells, PuzzleGrid, Reachable, StatusChange};
pub use scoring::{format_time, starting_score, victory_line};
pub use session::{Phase, PuzzleSession};
pub use snapshot::SessionSnapshot;
pub use timer::Timer;
