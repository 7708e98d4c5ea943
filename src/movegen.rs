//! 合法走法生成
//!
//! 对每个己方棋子检查全部 90 个格子，先按兵种走法过滤，
//! 再排除造成将帅照面和让己方被将军的走法。

use crate::board::Board;
use crate::types::{Color, Move, Position};

impl Board {
    /// 获取某方所有合法走法
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        self.visit_legal_moves(color, |mv| {
            moves.push(mv);
            true
        });
        moves
    }

    /// 某方是否至少有一个合法走法
    pub fn has_legal_move(&self, color: Color) -> bool {
        let mut found = false;
        self.visit_legal_moves(color, |_| {
            found = true;
            false
        });
        found
    }

    /// 某方合法走法数量（用于机动性评估）
    pub fn count_legal_moves(&self, color: Color) -> usize {
        let mut count = 0;
        self.visit_legal_moves(color, |_| {
            count += 1;
            true
        });
        count
    }

    /// 在某方合法走法中查找指定起止点的走法
    pub fn find_legal_move(&self, color: Color, from: Position, to: Position) -> Option<Move> {
        let piece = self.piece_at(from).filter(|p| p.color == color)?;
        if !self.is_legal_move(from, to) {
            return None;
        }
        Some(Move {
            piece,
            from,
            to,
            captured: self.piece_at(to),
        })
    }

    /// 逐个产出合法走法，回调返回 false 时提前结束
    fn visit_legal_moves<F>(&self, color: Color, mut visit: F)
    where
        F: FnMut(Move) -> bool,
    {
        let mut scratch = self.clone();

        for (from, piece) in self.pieces_of(color) {
            for to in Position::all() {
                if !self.can_move(from, to) {
                    continue;
                }
                let captured = self.piece_at(to);
                let after = scratch.scoped_move(from, to);
                if after.is_flying_general() {
                    continue;
                }
                // 被将军时即解将走法，未被将军时即不送将的走法
                let keep = !after.is_in_check(color);
                drop(after);
                if keep
                    && !visit(Move {
                        piece,
                        from,
                        to,
                        captured,
                    })
                {
                    return;
                }
            }
        }
    }
}
