//! 对局控制器
//!
//! 在规则引擎之上维护走子方、回合数、吃子记录和胜负状态。

use log::{debug, info, warn};

use crate::ai::AIEngine;
use crate::board::{Board, MoveResult};
use crate::error::{BoardError, GameError};
use crate::fen::{parse_fen, to_fen};
use crate::positions::Endgame;
use crate::types::{parse_iccs_move, Color, Move, Outcome, Piece, Position};

/// 获胜方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    Stalemate,
    GeneralCaptured,
    Resignation,
}

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Over { winner: Color, reason: WinReason },
}

/// 吃子记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRecord {
    /// 被吃的子
    pub piece: Piece,
    /// 吃子的子
    pub captured_by: Piece,
    /// 发生在第几回合
    pub round: u32,
}

/// 一盘棋
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    round: u32,
    captures: Vec<CaptureRecord>,
    history: Vec<Move>,
    checked: Option<Color>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// 标准开局，红方先走
    pub fn new() -> Self {
        Game::from_board(Board::initial(), Color::Red)
    }

    /// 从任意局面开始
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut game = Game {
            board,
            turn,
            round: 1,
            captures: Vec::new(),
            history: Vec::new(),
            checked: None,
            status: GameStatus::Ongoing,
        };
        game.update_status();
        game
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let state = parse_fen(fen)?;
        Ok(Game::from_board(state.board, state.turn))
    }

    pub fn from_endgame(endgame: Endgame) -> Result<Self, GameError> {
        Ok(Game::from_board(endgame.board()?, endgame.side_to_move()))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// 当前回合数（每走一步加一，从 1 开始）
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// 被将军的一方
    pub fn checked_side(&self) -> Option<Color> {
        self.checked
    }

    pub fn is_check(&self) -> bool {
        self.checked.is_some()
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(
            self.status,
            GameStatus::Over {
                reason: WinReason::Checkmate,
                ..
            }
        )
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Over { winner, .. } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    pub fn to_fen(&self) -> String {
        to_fen(&self.board, self.turn)
    }

    /// 走子方的合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.legal_moves(self.turn)
    }

    /// 走一步棋
    pub fn play(&mut self, from: Position, to: Position) -> Result<Move, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(BoardError::EmptySquare(from))?;
        if piece.color != self.turn {
            return Err(GameError::WrongSide {
                expected: self.turn,
            });
        }
        // 符合走法但走后被将军或将帅照面，单独报告
        let mv = self.board.find_legal_move(self.turn, from, to).ok_or(
            if self.board.can_move(from, to) {
                GameError::SelfCheck { from, to }
            } else {
                GameError::IllegalMove { from, to }
            },
        )?;

        self.board.apply_move(mv.from, mv.to)?;
        debug!("round {}: {} {} {}", self.round, self.turn, piece.kind, mv);

        if let Some(captured) = mv.captured {
            self.captures.push(CaptureRecord {
                piece: captured,
                captured_by: piece,
                round: self.round,
            });
        }

        self.history.push(mv);
        self.turn = self.turn.opposite();
        self.round += 1;
        self.update_status();
        Ok(mv)
    }

    /// 以 ICCS 字符串走一步棋，例如 `h2e2`
    pub fn play_iccs(&mut self, move_str: &str) -> Result<Move, GameError> {
        let (from, to) = parse_iccs_move(move_str)
            .ok_or_else(|| GameError::InvalidMoveString(move_str.to_string()))?;
        self.play(from, to)
    }

    /// 由 AI 为走子方走一步；AI 无着可走时认输，返回 None
    pub fn play_ai(&mut self, engine: &AIEngine) -> Result<Option<Move>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        match engine.select_best_move(&self.board, self.turn) {
            Some(mv) => self.play(mv.from, mv.to).map(Some),
            None => {
                warn!("{} AI found no move and resigns", self.turn);
                self.resign();
                Ok(None)
            }
        }
    }

    /// 走子方认输
    pub fn resign(&mut self) {
        if self.is_over() {
            return;
        }
        self.finish(self.turn.opposite(), WinReason::Resignation);
    }

    /// 悔一步棋，返回被撤销的走法
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.undo_move(MoveResult {
            from: mv.from,
            to: mv.to,
            captured: mv.captured,
        });
        if mv.captured.is_some() {
            self.captures.pop();
        }
        self.turn = self.turn.opposite();
        self.round -= 1;
        self.status = GameStatus::Ongoing;
        self.update_status();
        Some(mv)
    }

    fn finish(&mut self, winner: Color, reason: WinReason) {
        info!(
            "game over after round {}: {} wins by {:?}",
            self.round, winner, reason
        );
        self.status = GameStatus::Over { winner, reason };
    }

    /// 走子后刷新将军与胜负状态
    fn update_status(&mut self) {
        for color in [Color::Red, Color::Black] {
            if self.board.find_king(color).is_none() {
                self.checked = None;
                self.finish(color.opposite(), WinReason::GeneralCaptured);
                return;
            }
        }

        self.checked = [self.turn, self.turn.opposite()]
            .into_iter()
            .find(|&color| self.board.is_in_check(color));
        if let Some(color) = self.checked {
            debug!("{} is in check", color);
        }

        match self.board.outcome(self.turn) {
            Some(Outcome::Checkmate { loser }) => {
                self.finish(loser.opposite(), WinReason::Checkmate)
            }
            Some(Outcome::Stalemate { loser }) => {
                self.finish(loser.opposite(), WinReason::Stalemate)
            }
            None => {}
        }
    }
}
