//! Puzzle session - countdown, clock, decaying score, and victory
//!
//! A session owns one [`PuzzleGrid`] and is the only thing that mutates it.
//! It moves through three phases:
//!
//! - **Starting**: a countdown runs; the grid ignores input
//! - **Playing**: the grid accepts moves; the score decays with time and moves
//! - **Victorious**: terminal; the grid is frozen and the placement is known
//!
//! Drive it by calling [`PuzzleSession::elapse_time`] once per fixed step and
//! routing input through the action methods between steps.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::grid::PuzzleGrid;
use crate::scoring::{apply_penalty, format_time, move_penalty, starting_score, time_penalty};
use crate::snapshot::SessionSnapshot;
use crate::timer::Timer;
use crate::types::{
    Difficulty, Direction, GameAction, Mode, MoveResult, Pos, Status, StatusMessage, UndoLabel,
    Valence, GAME_START_DELAY_SECS, MAX_MINUTE_DIGITS, MIN_MINUTE_DIGITS, STATUS_LINGER_SECS,
};
use numerate_scores::ScoreLedger;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Starting,
    Playing,
    Victorious,
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    grid: PuzzleGrid,
    phase: Phase,
    seed: u64,
    score: i32,
    elapsed: f64,
    whole_seconds: u64,
    countdown: u32,
    start_timer: Timer,
    status_timer: Timer,
    status: Status,
    default_status: Status,
    placement: Option<usize>,
}

impl PuzzleSession {
    /// Start a session on a freshly generated grid.
    ///
    /// The same seed always produces the same grid.
    pub fn new(mode: Mode, difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut session = Self::with_grid(PuzzleGrid::generate(mode, difficulty, &mut rng));
        session.seed = seed;
        session
    }

    /// Start a session on an existing grid.
    pub fn with_grid(grid: PuzzleGrid) -> Self {
        let score = starting_score(grid.mode(), grid.difficulty());
        log::info!(
            "new {:?} session on {:?} grid, starting score {}",
            grid.mode(),
            grid.difficulty(),
            score
        );
        let start_timer = Timer::one_shot(GAME_START_DELAY_SECS);
        Self {
            grid,
            phase: Phase::Starting,
            seed: 0,
            score,
            elapsed: 0.0,
            whole_seconds: 0,
            countdown: start_timer.remaining().ceil() as u32,
            start_timer,
            status_timer: Timer::one_shot(STATUS_LINGER_SECS).paused(),
            status: Status::neutral(StatusMessage::Waiting),
            default_status: Status::neutral(StatusMessage::SelectPrompt),
            placement: None,
        }
    }

    /// Advance the session by `dt` seconds.
    ///
    /// `ledger` is only consulted on the step that wins the puzzle, to work
    /// out where the final score would place. Nothing is written to it.
    pub fn elapse_time(&mut self, dt: f64, ledger: &ScoreLedger) {
        if self.phase == Phase::Victorious {
            return;
        }

        self.start_timer.advance(dt);
        self.status_timer.advance(dt);

        match self.phase {
            Phase::Starting => {
                if self.start_timer.consume_trigger() {
                    self.grid.set_active(true);
                    self.countdown = 0;
                    self.phase = Phase::Playing;
                    self.accumulate(dt);
                    log::info!("countdown finished, puzzle live");
                } else {
                    self.countdown = self.start_timer.remaining().ceil() as u32;
                }
            }
            Phase::Playing => {
                self.accumulate(dt);
                let moves = self.grid.take_pending_moves();
                if moves > 0 {
                    self.score = apply_penalty(self.score, move_penalty(moves));
                }
            }
            Phase::Victorious => {}
        }

        if self.status_timer.is_active() && self.status_timer.consume_trigger() {
            self.status = self.default_status;
        }

        if let Some(change) = self.grid.take_status_change() {
            self.status = change.status;
            self.default_status = change.default;
            if change.transient {
                self.status_timer.reset();
                self.status_timer.set_active(true);
                self.status_timer.advance(dt);
            } else {
                self.status_timer.set_active(false);
            }
        }

        if self.phase == Phase::Playing && self.grid.is_victorious() {
            self.win(ledger);
        }
    }

    fn accumulate(&mut self, dt: f64) {
        self.elapsed += dt;
        let whole = self.elapsed.max(0.0) as u64;
        if whole > self.whole_seconds {
            self.score = apply_penalty(self.score, time_penalty(whole - self.whole_seconds));
            self.whole_seconds = whole;
        }
    }

    fn win(&mut self, ledger: &ScoreLedger) {
        self.grid.set_active(false);
        self.phase = Phase::Victorious;
        let victory = Status::new(StatusMessage::Victory, Valence::Positive);
        self.status = victory;
        self.default_status = victory;
        self.status_timer.set_active(false);
        self.placement = ledger.placement(self.grid.difficulty(), self.score);
        log::info!(
            "solved in {} moves, {}s, score {}, placement {:?}",
            self.grid.move_count(),
            self.whole_seconds,
            self.score,
            self.placement
        );
    }

    /// Route a player action to the grid.
    pub fn apply_action(&mut self, action: GameAction) -> MoveResult {
        match action {
            GameAction::Cursor(direction) => {
                if self.move_cursor(direction, 1) {
                    MoveResult::Success
                } else {
                    MoveResult::Irrelevant
                }
            }
            GameAction::Confirm => self.confirm(),
            GameAction::Cancel => self.cancel(),
            GameAction::ToggleUndo => self.toggle_undo(),
        }
    }

    /// Pointer moved to `cell` (`None` when off the grid).
    pub fn point_at(&mut self, cell: Option<Pos>) {
        self.grid.point_at(cell);
    }

    pub fn move_cursor(&mut self, direction: Direction, amount: usize) -> bool {
        self.grid.move_cursor(direction, amount)
    }

    pub fn confirm(&mut self) -> MoveResult {
        self.grid.select_or_swap()
    }

    pub fn cancel(&mut self) -> MoveResult {
        self.grid.deselect()
    }

    /// Undo/redo the last move. Does nothing unless [`Self::undo_enabled`].
    pub fn toggle_undo(&mut self) -> MoveResult {
        if !self.undo_enabled() {
            return MoveResult::Irrelevant;
        }
        self.grid.toggle_undo()
    }

    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.grid.mode()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.grid.difficulty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_victorious(&self) -> bool {
        self.phase == Phase::Victorious
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.grid.move_count()
    }

    /// Seconds played so far (zero during the countdown).
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    pub fn whole_seconds(&self) -> u64 {
        self.whole_seconds
    }

    /// In-game clock text, e.g. `03:27`.
    pub fn formatted_time(&self) -> String {
        format_time(self.whole_seconds, MIN_MINUTE_DIGITS, MAX_MINUTE_DIGITS)
    }

    /// Whole seconds left before the puzzle goes live.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Rank the final score would take in the high score list, once won.
    pub fn placement(&self) -> Option<usize> {
        self.placement
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn default_status(&self) -> Status {
        self.default_status
    }

    pub fn undo_enabled(&self) -> bool {
        self.phase == Phase::Playing
            && self.grid.selection().is_none()
            && (self.grid.move_count() > 0 || self.grid.is_undone())
    }

    pub fn hint_enabled(&self) -> bool {
        self.phase == Phase::Playing && self.grid.selection().is_none()
    }

    pub fn undo_label(&self) -> UndoLabel {
        if self.grid.is_undone() {
            UndoLabel::Redo
        } else {
            UndoLabel::Undo
        }
    }

    /// Copy everything a renderer needs into `out`.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let grid = &self.grid;
        out.mode = grid.mode();
        out.difficulty = grid.difficulty();
        out.side = grid.side() as u8;
        out.cells = *grid.cells();
        out.reachable = *grid.reachable_matrix();
        out.cursor = grid.cursor();
        out.selection = grid.selection();
        out.focused = grid.is_focused();
        out.grid_active = grid.is_active();
        out.phase = self.phase;
        out.countdown = self.countdown;
        out.whole_seconds = self.whole_seconds;
        out.moves = grid.move_count();
        out.score = self.score;
        out.status = self.status;
        out.undo_enabled = self.undo_enabled();
        out.hint_enabled = self.hint_enabled();
        out.undo_label = self.undo_label();
        out.placement = self.placement;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snap = SessionSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
