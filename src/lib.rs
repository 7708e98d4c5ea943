//! Xiangqi rules engine and search AI
//!
//! 中国象棋规则引擎 - 走法合法性、将军/将死/照面判定、Minimax AI，支持 FEN 输入输出

pub mod ai;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
mod movegen;
pub mod pieces;
pub mod positions;
mod rules;
pub mod types;

pub use ai::{
    get_node_count, reset_node_count, AIConfig, AIEngine, AIStrategy, EvalConfig, Evaluator,
    MinimaxAI, RandomAI, ScoredMove, MATE_SCORE,
};
pub use board::{Board, MoveResult, ScopedMove};
pub use error::{BoardError, FenError, GameError};
pub use fen::{apply_move_to_fen, parse_fen, to_fen, FenState, INITIAL_FEN};
pub use game::{CaptureRecord, Game, GameStatus, WinReason};
pub use positions::Endgame;
pub use types::{
    parse_iccs_move, Color, Move, Outcome, Piece, PieceId, PieceSpec, PieceStatus, PieceType,
    Position,
};
