//! Win conditions, one per [`Mode`]. All are pure functions of the cells.

use crate::grid::Cells;
use crate::types::{Mode, MAX_SIDE};

pub fn is_victorious(mode: Mode, cells: &Cells, side: usize) -> bool {
    match mode {
        Mode::LineUp => line_up(cells, side),
        Mode::Alternate => alternate(cells, side),
        Mode::Scatter => scatter(cells, side),
        Mode::Summation => summation(cells, side),
    }
}

/// Rows filled with `1..=n` (either order), or columns filled the same way.
pub fn line_up(cells: &Cells, side: usize) -> bool {
    let n = side;
    let filled = |expected: &dyn Fn(usize, usize) -> usize| {
        (0..n).all(|r| (0..n).all(|c| cells[r][c] as usize == expected(r, c)))
    };
    filled(&|r, _| r + 1) || filled(&|r, _| n - r) || filled(&|_, c| c + 1) || filled(&|_, c| n - c)
}

/// Every row alternates between two values by column parity, or every
/// column does by row parity. The two values may coincide.
pub fn alternate(cells: &Cells, side: usize) -> bool {
    let alternates = |at: &dyn Fn(usize, usize) -> u8| {
        (0..side).all(|line| (2..side).all(|k| at(line, k) == at(line, k - 2)))
    };
    alternates(&|r, c| cells[r][c]) || alternates(&|c, r| cells[r][c])
}

/// No tile equals its left or upper neighbour.
pub fn scatter(cells: &Cells, side: usize) -> bool {
    (0..side).all(|r| {
        (0..side).all(|c| {
            let v = cells[r][c];
            (c == 0 || cells[r][c - 1] != v) && (r == 0 || cells[r - 1][c] != v)
        })
    })
}

/// Every row and every column holds each value in `1..=side`.
///
/// Values outside that range are ignored.
pub fn summation(cells: &Cells, side: usize) -> bool {
    let covers = |values: &mut dyn Iterator<Item = u8>| {
        let mut seen = [false; MAX_SIDE + 1];
        for v in values {
            let v = v as usize;
            if (1..=side).contains(&v) {
                seen[v] = true;
            }
        }
        seen[1..=side].iter().all(|s| *s)
    };
    (0..side).all(|r| covers(&mut (0..side).map(|c| cells[r][c])))
        && (0..side).all(|c| covers(&mut (0..side).map(|r| cells[r][c])))
}
