//! Score table, time/move decay, and clock formatting.

use crate::types::{Difficulty, Mode, MOVE_PENALTY, SECOND_PENALTY, STARTING_SCORES};

/// Starting score for a new session.
///
/// Every mode currently shares the same table; out-of-table lookups give 0.
pub fn starting_score(mode: Mode, difficulty: Difficulty) -> i32 {
    match mode {
        Mode::LineUp | Mode::Alternate | Mode::Scatter | Mode::Summation => {
            STARTING_SCORES.get(difficulty.index()).copied().unwrap_or(0)
        }
    }
}

/// Subtract `penalty`, flooring at zero. A score already at zero stays there.
pub fn apply_penalty(score: i32, penalty: i64) -> i32 {
    if score <= 0 {
        return score.max(0);
    }
    (score as i64 - penalty).clamp(0, score as i64) as i32
}

/// Penalty for `seconds` whole seconds of play.
pub fn time_penalty(seconds: u64) -> i64 {
    (SECOND_PENALTY as i64).saturating_mul(seconds as i64)
}

/// Penalty for `moves` moves.
pub fn move_penalty(moves: u32) -> i64 {
    MOVE_PENALTY as i64 * moves as i64
}

/// Format whole seconds as `m:ss`.
///
/// Minutes are zero padded to `min_minute_digits`. When the minutes need more
/// than `max_minute_digits` digits the clock saturates at all nines and `:59`.
///
/// ```
/// use numerate_core::scoring::format_time;
///
/// assert_eq!(format_time(65, 2, 3), "01:05");
/// assert_eq!(format_time(0, 1, 15), "0:00");
/// assert_eq!(format_time(60 * 1000, 2, 3), "999:59");
/// ```
pub fn format_time(seconds: u64, min_minute_digits: usize, max_minute_digits: usize) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    if digits(minutes) > max_minute_digits {
        return format!("{}:59", "9".repeat(max_minute_digits));
    }
    format!("{minutes:0min_minute_digits$}:{secs:02}")
}

fn digits(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

const NEW_TOP_SCORE: [&str; 3] = [
    "Hot dang! New #1 high score.",
    "You beat your old record and got a new #1 high score.",
    "And I thought the old high score was untoppable. New #1 score.",
];

const NEW_SCORE: [&str; 4] = [
    "Nice one. New #{} high score.",
    "Impressive... very impressive. New #{} high score.",
    "You just earned yourself a new #{} high score!",
    "It appears I underestimated you. Nice new #{} score you got there.",
];

const NO_NEW_SCORE: [&str; 3] = ["You did it.", "Not bad at all.", "Quite good, quite good."];

/// Line shown on the victory panel. `variant` picks among equivalent phrasings.
pub fn victory_line(placement: Option<usize>, variant: usize) -> String {
    match placement {
        Some(1) => NEW_TOP_SCORE[variant % NEW_TOP_SCORE.len()].to_string(),
        Some(rank) => NEW_SCORE[variant % NEW_SCORE.len()].replace("{}", &rank.to_string()),
        None => NO_NEW_SCORE[variant % NO_NEW_SCORE.len()].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_scores_by_difficulty() {
        for mode in Mode::ALL {
            assert_eq!(starting_score(mode, Difficulty::Easy), 50_000);
            assert_eq!(starting_score(mode, Difficulty::Medium), 96_000);
            assert_eq!(starting_score(mode, Difficulty::Hard), 145_000);
            assert_eq!(starting_score(mode, Difficulty::Master), 210_000);
        }
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        assert_eq!(apply_penalty(100, 13), 87);
        assert_eq!(apply_penalty(10, 13), 0);
        assert_eq!(apply_penalty(0, 13), 0);
        assert_eq!(apply_penalty(50, i64::MAX), 0);
        assert_eq!(apply_penalty(50, 0), 50);
    }

    #[test]
    fn test_penalties() {
        assert_eq!(time_penalty(4), 12);
        assert_eq!(move_penalty(3), 39);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0, 2, 3), "00:00");
        assert_eq!(format_time(59, 2, 3), "00:59");
        assert_eq!(format_time(61, 2, 3), "01:01");
        assert_eq!(format_time(60 * 123 + 7, 2, 3), "123:07");
        assert_eq!(format_time(60 * 999 + 59, 2, 3), "999:59");
        assert_eq!(format_time(60 * 1000, 2, 3), "999:59");
        assert_eq!(format_time(60 * 1000, 1, 15), "1000:00");
    }

    #[test]
    fn test_victory_lines() {
        assert_eq!(victory_line(Some(1), 0), "Hot dang! New #1 high score.");
        assert_eq!(victory_line(Some(3), 0), "Nice one. New #3 high score.");
        assert_eq!(victory_line(None, 4), "Not bad at all.");
    }
}
