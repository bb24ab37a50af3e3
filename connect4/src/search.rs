//! Exhaustive fixed-depth minimax over a scratch copy of the board.
//!
//! Plies are counted from the root: ply 1 is the opponent's reply to the
//! candidate move under test, ply 2 the engine's answer, and so on. Wins are
//! divided by the ply they were found at, so a quick win outranks a slow one
//! and a slow loss outranks a quick one.
use tracing::{debug, trace};

use crate::board::{Board, Player};
use crate::eval::{board_state_score, Evaluation};

/// Whose decision a search node represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The engine moves and keeps the highest child.
    Max,
    /// The opponent moves and keeps the lowest child.
    Min,
}

impl Turn {
    pub fn at_ply(ply: u32) -> Turn {
        if ply % 2 == 1 {
            Turn::Min
        } else {
            Turn::Max
        }
    }

    pub fn mover(self, me: Player) -> Player {
        match self {
            Turn::Max => me,
            Turn::Min => me.opponent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputerPlayer {
    id: Player,
    max_plies: u32,
}

impl ComputerPlayer {
    pub fn new(id: Player, max_plies: u32) -> Self {
        debug_assert!(max_plies >= 1, "ply budget must be positive");
        Self { id, max_plies }
    }

    pub fn id(&self) -> Player {
        self.id
    }

    pub fn max_plies(&self) -> u32 {
        self.max_plies
    }

    /// Column to drop into, or `None` when the board is already full.
    /// Equal scores keep the leftmost column.
    pub fn pick_move(&self, board: &Board) -> Option<usize> {
        if board.is_full() {
            return None;
        }
        let mut rack = board.clone();
        let mut best: Option<(usize, f64)> = None;
        for col in 0..rack.columns() {
            if !rack.simulate_move(col, self.id) {
                continue;
            }
            let score = self.minimax(&mut rack, 1);
            let reverted = rack.revert_move(col);
            debug_assert!(reverted);
            trace!(column = col, score, "root candidate");
            if best.map_or(true, |(_, high)| score > high) {
                best = Some((col, score));
            }
        }
        debug_assert_eq!(&rack, board);
        let (column, score) = best?;
        debug!(
            column,
            score,
            player = self.id.id(),
            plies = self.max_plies,
            "picked move"
        );
        Some(column)
    }

    fn minimax(&self, rack: &mut Board, ply: u32) -> f64 {
        let eval = board_state_score(rack, self.id);
        if eval.is_win {
            return discounted(eval, ply);
        }
        if rack.is_full() {
            return 0.0;
        }
        if ply == self.max_plies {
            // Already settled by the win check above; kept so a cutoff
            // board that registers a win is still discounted.
            return if eval.is_win {
                discounted(eval, ply)
            } else {
                eval.score as f64
            };
        }

        let turn = Turn::at_ply(ply);
        let player = turn.mover(self.id);
        let mut high = f64::NEG_INFINITY;
        let mut low = f64::INFINITY;
        for col in 0..rack.columns() {
            if !rack.simulate_move(col, player) {
                continue;
            }
            let score = self.minimax(rack, ply + 1);
            high = high.max(score);
            low = low.min(score);
            let reverted = rack.revert_move(col);
            debug_assert!(reverted);
        }

        match turn {
            Turn::Max => high,
            Turn::Min => low,
        }
    }
}

fn discounted(eval: Evaluation, ply: u32) -> f64 {
    eval.score as f64 / f64::from(ply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_alternates_with_ply() {
        assert_eq!(Turn::at_ply(1), Turn::Min);
        assert_eq!(Turn::at_ply(2), Turn::Max);
        assert_eq!(Turn::at_ply(7), Turn::Min);
        assert_eq!(Turn::Min.mover(Player::One), Player::Two);
        assert_eq!(Turn::Min.mover(Player::Two), Player::One);
        assert_eq!(Turn::Max.mover(Player::Two), Player::Two);
    }

    #[test]
    fn empty_board_prefers_the_centre() {
        let board = Board::new(7, 6);
        let before = board.clone();
        let engine = ComputerPlayer::new(Player::One, 1);
        assert_eq!(engine.pick_move(&board), Some(3));
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_has_no_move() {
        let rack: Vec<Vec<u8>> = (0..7)
            .map(|col| (0..6).map(|row| ((col / 2 + row) % 2 + 1) as u8).collect())
            .collect();
        let board = Board::from_rack(&rack).unwrap();
        assert!(board.is_full());
        for plies in [1, 3] {
            assert_eq!(ComputerPlayer::new(Player::Two, plies).pick_move(&board), None);
        }
    }

    #[test]
    fn only_open_column_is_chosen() {
        let mut rack: Vec<Vec<u8>> = (0..7)
            .map(|col| (0..6).map(|row| ((col / 2 + row) % 2 + 1) as u8).collect())
            .collect();
        rack[5][5] = 0;
        let board = Board::from_rack(&rack).unwrap();
        assert_eq!(ComputerPlayer::new(Player::One, 4).pick_move(&board), Some(5));
    }

    #[test]
    fn full_board_without_a_line_is_a_draw() {
        let board = Board::from_rack(&[vec![1], vec![2], vec![1], vec![2]]).unwrap();
        assert!(!board_state_score(&board, Player::One).is_win);
        for id in [Player::One, Player::Two] {
            let engine = ComputerPlayer::new(id, 5);
            assert_eq!(engine.minimax(&mut board.clone(), 1), 0.0);
            assert_eq!(engine.minimax(&mut board.clone(), 2), 0.0);
        }
    }

    #[test]
    fn prefers_a_draw_over_a_loss() {
        // `_ _ 2 2 2`: column 0 lets player 2 win in column 1, column 1
        // blocks and the row fills up without a line.
        let board = Board::from_rack(&[vec![0], vec![0], vec![2], vec![2], vec![2]]).unwrap();
        for plies in [2, 5] {
            let engine = ComputerPlayer::new(Player::One, plies);
            let mut rack = board.clone();
            rack.simulate_move(0, Player::One);
            assert_eq!(engine.minimax(&mut rack, 1), -500_000_000.0);
            let mut rack = board.clone();
            rack.simulate_move(1, Player::One);
            assert_eq!(engine.minimax(&mut rack, 1), 0.0);
            assert_eq!(engine.pick_move(&board), Some(1), "ply budget {plies}");
        }
    }

    #[test]
    fn nearer_wins_score_higher() {
        let mut board = Board::new(4, 1);
        for col in 0..4 {
            board.simulate_move(col, Player::One);
        }
        let engine = ComputerPlayer::new(Player::One, 5);
        let near = engine.minimax(&mut board.clone(), 1);
        let far = engine.minimax(&mut board, 3);
        assert!(near > far);
        assert_eq!(near, 1_000_000_000.0);

        let rival = ComputerPlayer::new(Player::Two, 5);
        assert!(rival.minimax(&mut board.clone(), 1) < rival.minimax(&mut board, 3));
    }

    #[test]
    fn search_leaves_the_working_board_untouched() {
        let mut board = Board::new(5, 4);
        board.simulate_move(1, Player::One);
        board.simulate_move(2, Player::Two);
        let before = board.clone();
        let engine = ComputerPlayer::new(Player::Two, 3);
        engine.minimax(&mut board, 1);
        assert_eq!(board, before);
    }
}
