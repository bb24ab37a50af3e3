//! Static evaluation over every line of four on the board.
use std::ops::Range;

use crate::board::{Board, Cell, Player};

pub const WIN_SCORE: i64 = 1_000_000_000;

/// Reward for a line holding one, two or three discs of a single player.
const LINE_SCORES: [i64; 4] = [0, 1, 10, 100];

const SPAN: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i64,
    pub is_win: bool,
}

impl Evaluation {
    const NEUTRAL: Evaluation = Evaluation {
        score: 0,
        is_win: false,
    };
}

/// Scores four aligned cells from `me`'s point of view.
pub fn quartet_score(quartet: [Cell; 4], me: Player) -> Evaluation {
    let mut owner = None;
    let mut discs = 0;
    for player in quartet.into_iter().flatten() {
        match owner {
            None => owner = Some(player),
            Some(seen) if seen != player => return Evaluation::NEUTRAL, // blocked line
            Some(_) => {}
        }
        discs += 1;
    }
    let Some(owner) = owner else {
        return Evaluation::NEUTRAL;
    };
    let sign = if owner == me { 1 } else { -1 };
    if discs == SPAN {
        Evaluation {
            score: sign * WIN_SCORE,
            is_win: true,
        }
    } else {
        Evaluation {
            score: sign * LINE_SCORES[discs],
            is_win: false,
        }
    }
}

/// Sums every quartet on the board. The first winning quartet found
/// short-circuits and is returned on its own.
pub fn board_state_score(board: &Board, me: Player) -> Evaluation {
    let mut score = 0;
    for line in Line::ALL {
        let (cols, rows) = line.origins(board.columns(), board.rows());
        for col in cols {
            for row in rows.clone() {
                let quartet = std::array::from_fn(|step| {
                    let (c, r) = line.cell(col, row, step);
                    board.get(c, r)
                });
                let eval = quartet_score(quartet, me);
                if eval.is_win {
                    return eval;
                }
                score += eval.score;
            }
        }
    }
    Evaluation {
        score,
        is_win: false,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Line {
    Vertical,
    Horizontal,
    /// Bottom-left to top-right.
    Rising,
    /// Top-left to bottom-right.
    Falling,
}

impl Line {
    const ALL: [Line; 4] = [Line::Vertical, Line::Horizontal, Line::Rising, Line::Falling];

    /// Column and row ranges of the first cell of each quartet. Both are
    /// empty when the line does not fit on the board.
    fn origins(self, columns: usize, rows: usize) -> (Range<usize>, Range<usize>) {
        let tall = 0..rows.saturating_sub(SPAN - 1);
        let wide = 0..columns.saturating_sub(SPAN - 1);
        match self {
            Line::Vertical => (0..columns, tall),
            Line::Horizontal => (wide, 0..rows),
            Line::Rising => (wide, tall),
            Line::Falling => (SPAN - 1..columns.max(SPAN - 1), tall),
        }
    }

    #[inline]
    fn cell(self, col: usize, row: usize, step: usize) -> (usize, usize) {
        match self {
            Line::Vertical => (col, row + step),
            Line::Horizontal => (col + step, row),
            Line::Rising => (col + step, row + step),
            Line::Falling => (col - step, row + step),
        }
    }
}
