//! 错误类型

use crate::types::Position;

/// 构造棋盘或执行走子时的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinates out of range: file {file}, rank {rank}")]
    OutOfBounds { file: i8, rank: i8 },

    #[error("square {0} is already occupied")]
    Occupied(Position),

    #[error("no piece at {0}")]
    EmptySquare(Position),

    #[error("origin and destination are the same square {0}")]
    SameSquare(Position),

    #[error("cannot capture own piece at {0}")]
    SelfCapture(Position),
}

/// FEN 解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("expected 10 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {cols} columns, expected 9")]
    RowWidth { row: usize, cols: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// 对局控制器错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("it is {expected}'s turn")]
    WrongSide { expected: crate::types::Color },

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Position, to: Position },

    #[error("move {from}{to} would leave the general exposed")]
    SelfCheck { from: Position, to: Position },

    #[error("invalid move string: '{0}'")]
    InvalidMoveString(String),

    #[error("unknown strategy: {0}. Available: minimax, random")]
    UnknownStrategy(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Fen(#[from] FenError),
}
