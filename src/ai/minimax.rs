//! Minimax AI 策略（可选 Alpha-Beta 剪枝）

use super::eval::Evaluator;
use super::{sort_and_truncate, AIConfig, AIStrategy, ScoredMove, NODE_COUNT};
use crate::board::Board;
use crate::types::{Color, Move};
use log::{debug, trace};
use std::cmp::Reverse;
use std::sync::atomic::Ordering;

/// 胜负分，减去层数使更快的杀棋得分更高
pub const MATE_SCORE: i32 = 100_000;

/// 困毙胜相对将死胜的扣分
const STALEMATE_DISCOUNT: i32 = 1;

/// 搜索窗口边界
const INFINITY: i32 = 1_000_000;

/// 走法排序：先吃高价值子，再按离中心的距离
pub(crate) fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| {
        let victim = mv.captured.map_or(0, |p| p.kind.value());
        let center = (mv.to.col - 4).abs() + (2 * mv.to.row - 9).abs();
        (Reverse(victim), center)
    });
}

/// Minimax AI，始终从根节点走子方的视角打分
pub struct MinimaxAI {
    depth: u32,
    alpha_beta: bool,
    evaluator: Evaluator,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig) -> Self {
        MinimaxAI {
            depth: config.depth.max(1),
            alpha_beta: config.alpha_beta,
            evaluator: Evaluator::new(config.eval),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// 对根节点每个走法打分
    ///
    /// `narrow` 为 true 时根节点也收紧窗口，只有最佳走法的分数是精确值。
    fn search_root(&self, board: &mut Board, side: Color, narrow: bool) -> Vec<ScoredMove> {
        let mut moves = board.legal_moves(side);
        order_moves(&mut moves);

        let mut alpha = -INFINITY;
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let score = if mv.captures_king() {
                MATE_SCORE
            } else {
                let window = if narrow && self.alpha_beta { alpha } else { -INFINITY };
                let mut child = board.scoped_move(mv.from, mv.to);
                self.minimax(&mut child, self.depth - 1, 1, window, INFINITY, side.opposite(), side)
            };
            trace!("root move {} score {}", mv, score);
            alpha = alpha.max(score);
            scored.push(ScoredMove { mv, score });
        }
        scored
    }

    /// 返回 `root` 视角的分数，`side` 为当前走子方
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &mut Board,
        depth: u32,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
        side: Color,
        root: Color,
    ) -> i32 {
        NODE_COUNT.fetch_add(1, Ordering::Relaxed);

        let maximizing = side == root;
        let mut moves = board.legal_moves(side);

        // 无子可走判负；困毙比将死少一分，同层时优先走将死
        if moves.is_empty() {
            let win = if board.is_in_check(side) {
                MATE_SCORE - ply
            } else {
                MATE_SCORE - ply - STALEMATE_DISCOUNT
            };
            return if maximizing { -win } else { win };
        }
        if depth == 0 {
            return self.evaluator.evaluate(board, root);
        }

        order_moves(&mut moves);
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves {
            if mv.captures_king() {
                return if maximizing {
                    MATE_SCORE - ply
                } else {
                    -(MATE_SCORE - ply)
                };
            }

            let score = {
                let mut child = board.scoped_move(mv.from, mv.to);
                self.minimax(&mut child, depth - 1, ply + 1, alpha, beta, side.opposite(), root)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if self.alpha_beta && beta <= alpha {
                break;
            }
        }
        best
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        let mut scratch = board.clone();
        let start = NODE_COUNT.load(Ordering::Relaxed);

        let mut scored = self.search_root(&mut scratch, side, n == 1);
        sort_and_truncate(&mut scored, n);

        debug!(
            "minimax depth={} alpha_beta={} side={} nodes={} best={}",
            self.depth,
            self.alpha_beta,
            side,
            NODE_COUNT.load(Ordering::Relaxed) - start,
            scored
                .first()
                .map_or_else(|| "none".to_string(), |sm| format!("{} ({})", sm.mv, sm.score))
        );
        scored
    }
}
