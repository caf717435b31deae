//! Random grid generation.
//!
//! Every value in `1..=side` may appear at most `side` times, so a full grid
//! holds each value exactly `side` times.
//!
//! - Most modes spread values out: a draw equal to the left or upper neighbour
//!   is re-drawn, up to [`PLACEMENT_RETRY_ATTEMPTS`] times.
//! - Scatter clumps values together on purpose, copying a neighbour with a
//!   chance that shrinks after every copy and resets after every fresh draw.

use rand::Rng;

use crate::grid::Cells;
use crate::types::{
    Difficulty, Mode, MAX_SIDE, PLACEMENT_RETRY_ATTEMPTS, REPEAT_TILE_CHANCE,
    REPEAT_TILE_MULTIPLIER,
};

/// Generate a cell matrix for `mode`. Only the top-left `side x side` block is used.
pub fn generate<R: Rng + ?Sized>(mode: Mode, difficulty: Difficulty, rng: &mut R) -> Cells {
    let mut fill = Fill::new(difficulty.side());
    match mode {
        Mode::Scatter => fill.clumped(rng),
        Mode::LineUp | Mode::Alternate | Mode::Summation => fill.spread(rng),
    }
    fill.cells
}

struct Fill {
    side: usize,
    cells: Cells,
    counts: [usize; MAX_SIDE],
}

impl Fill {
    fn new(side: usize) -> Self {
        Self {
            side,
            cells: [[0; MAX_SIDE]; MAX_SIDE],
            counts: [0; MAX_SIDE],
        }
    }

    fn has_room(&self, value: u8) -> bool {
        self.counts[(value - 1) as usize] < self.side
    }

    fn place(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row][col] = value;
        self.counts[(value - 1) as usize] += 1;
    }

    /// Uniform draw among values that still have room.
    fn draw_open<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        loop {
            let value = rng.random_range(1..=self.side as u8);
            if self.has_room(value) {
                return value;
            }
        }
    }

    fn left(&self, row: usize, col: usize) -> Option<u8> {
        (col > 0).then(|| self.cells[row][col - 1])
    }

    fn up(&self, row: usize, col: usize) -> Option<u8> {
        (row > 0).then(|| self.cells[row - 1][col])
    }

    fn spread<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in 0..self.side {
            for col in 0..self.side {
                let mut attempts = 0;
                let value = loop {
                    let value = self.draw_open(rng);
                    let clashes =
                        self.left(row, col) == Some(value) || self.up(row, col) == Some(value);
                    if !clashes || attempts >= PLACEMENT_RETRY_ATTEMPTS {
                        break value;
                    }
                    attempts += 1;
                };
                self.place(row, col, value);
            }
        }
    }

    fn clumped<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut repeat_chance = REPEAT_TILE_CHANCE;
        for row in 0..self.side {
            for col in 0..self.side {
                if (row, col) != (0, 0) && rng.random::<f64>() < repeat_chance {
                    let (left, up) = (self.left(row, col), self.up(row, col));
                    let order = if rng.random::<f64>() < 0.5 {
                        [left, up]
                    } else {
                        [up, left]
                    };
                    if let Some(value) = order.into_iter().flatten().find(|v| self.has_room(*v)) {
                        self.place(row, col, value);
                        repeat_chance *= REPEAT_TILE_MULTIPLIER;
                        continue;
                    }
                }
                let value = self.draw_open(rng);
                self.place(row, col, value);
                repeat_chance = REPEAT_TILE_CHANCE;
            }
        }
    }
}
