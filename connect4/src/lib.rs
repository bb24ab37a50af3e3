//! Connect 4 engine built on exhaustive fixed-depth minimax.
//! Callers hand over a column-major rack (`0` empty, `1`/`2` owned discs,
//! column 0 on the left, row 0 at the bottom), the engine's own player id and
//! a ply budget. The engine answers with the column that maximizes its
//! outcome under optimal counterplay, or `None` when the rack is full.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod board;
pub mod eval;
pub mod search;

pub use board::{Board, Cell, Player};
pub use eval::{board_state_score, quartet_score, Evaluation, WIN_SCORE};
pub use search::{ComputerPlayer, Turn};

/// Deepest ply budget accepted through [`best_move`]; the search has no
/// pruning, so cost grows as `columns ^ level`.
pub const MAX_LEVEL: u8 = 8;

/// Widest and tallest rack accepted through [`best_move`].
pub const MAX_COLUMNS: usize = 9;
pub const MAX_ROWS: usize = 9;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("board must have at least one column and one row")]
    EmptyBoard,
    #[error("column {column} has {found} rows, expected {expected}")]
    RaggedBoard {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({column}, {row}) holds {value}, expected 0, 1 or 2")]
    InvalidCell { column: usize, row: usize, value: u8 },
    #[error("disc at ({column}, {row}) is floating above an empty cell")]
    FloatingDisc { column: usize, row: usize },
    #[error("player id {0} is not 1 or 2")]
    InvalidPlayer(u8),
    #[error("depth {0} is out of range (1-{max})", max = MAX_LEVEL)]
    DepthOutOfRange(u8),
    #[error(
        "board is {columns}x{rows}, at most {max_columns}x{max_rows} is supported",
        max_columns = MAX_COLUMNS,
        max_rows = MAX_ROWS
    )]
    BoardTooLarge { columns: usize, rows: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub rack: Vec<Vec<u8>>,
    pub player: Player,
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// `None` when the rack is already full.
    pub column: Option<usize>,
}

pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    if !(1..=MAX_LEVEL).contains(&request.level) {
        return Err(GameError::DepthOutOfRange(request.level));
    }
    let columns = request.rack.len();
    let rows = request.rack.iter().map(Vec::len).max().unwrap_or(0);
    if columns > MAX_COLUMNS || rows > MAX_ROWS {
        return Err(GameError::BoardTooLarge { columns, rows });
    }
    let board = Board::from_rack(&request.rack)?;
    let engine = ComputerPlayer::new(request.player, u32::from(request.level));
    Ok(MoveResponse {
        column: engine.pick_move(&board),
    })
}
