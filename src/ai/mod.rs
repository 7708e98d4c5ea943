//! AI 策略模块
//!
//! 提供 Minimax（Alpha-Beta 剪枝）和随机两种策略

pub mod eval;
mod minimax;
mod random;

pub use eval::{EvalConfig, Evaluator};
pub use minimax::{MinimaxAI, MATE_SCORE};
pub use random::RandomAI;

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// 全局节点计数器
pub static NODE_COUNT: AtomicU64 = AtomicU64::new(0);

/// 重置节点计数器
pub fn reset_node_count() {
    NODE_COUNT.store(0, AtomicOrdering::Relaxed);
}

/// 获取当前节点计数
pub fn get_node_count() -> u64 {
    NODE_COUNT.load(AtomicOrdering::Relaxed)
}

use crate::board::Board;
use crate::error::{FenError, GameError};
use crate::fen::parse_fen;
use crate::types::{Color, Move};

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度
    pub depth: u32,
    /// 随机种子
    pub seed: Option<u64>,
    /// 是否启用 Alpha-Beta 剪枝（关闭时为完整 minimax）
    pub alpha_beta: bool,
    /// 评估开关
    pub eval: EvalConfig,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: 3,
            seed: None,
            alpha_beta: true,
            eval: EvalConfig::default(),
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// AI 策略接口
pub trait AIStrategy {
    /// 为 `side` 选择走法（返回按分数降序的前 n 个）
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳走法，无合法走法时返回 None（认输）
    fn select_best_move(&self, board: &Board, side: Color) -> Option<Move> {
        self.select_moves(board, side, 1).first().map(|sm| sm.mv)
    }
}

/// 排序辅助函数（稳定排序，同分保持原顺序）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 创建 Minimax AI
    pub fn minimax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, GameError> {
        match name.to_lowercase().as_str() {
            "random" => Ok(Self::random(config.seed)),
            "minimax" | "alphabeta" | "alpha_beta" => Ok(Self::minimax(config)),
            _ => Err(GameError::UnknownStrategy(name.to_string())),
        }
    }

    pub fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, side, n)
    }

    pub fn select_best_move(&self, board: &Board, side: Color) -> Option<Move> {
        self.strategy.select_best_move(board, side)
    }

    /// 从 FEN 选择走法（返回带评分的 ICCS 走法字符串）
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> Result<Vec<(String, i32)>, FenError> {
        let state = parse_fen(fen)?;
        let moves = self.strategy.select_moves(&state.board, state.turn, n);
        Ok(moves
            .into_iter()
            .map(|sm| (sm.mv.to_iccs(), sm.score))
            .collect())
    }

    /// 从 FEN 选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str) -> Result<Option<String>, FenError> {
        let state = parse_fen(fen)?;
        Ok(self
            .strategy
            .select_best_move(&state.board, state.turn)
            .map(|m| m.to_iccs()))
    }
}
