//! 将军、将死、困毙与将帅照面判定
//!
//! 所有查询只读棋盘。需要试走的查询在棋盘副本上进行，
//! 调用方的棋盘不会被修改。

use crate::board::Board;
use crate::pieces::can_move;
use crate::types::{Color, Outcome, Position};

impl Board {
    /// 起点棋子能否按兵种走法走到终点（不考虑将军）
    #[inline]
    pub fn can_move(&self, from: Position, to: Position) -> bool {
        can_move(self, from, to)
    }

    /// 检查某方是否被将军
    ///
    /// 该方没有将时视为未被将军。
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king_pos) = self.find_king(color) else {
            return false;
        };
        self.pieces_of(color.opposite())
            .any(|(from, _)| can_move(self, from, king_pos))
    }

    /// 将帅是否在同一列且中间无子
    pub fn is_flying_general(&self) -> bool {
        let (Some(red), Some(black)) = (self.find_king(Color::Red), self.find_king(Color::Black))
        else {
            return false;
        };
        if red.col != black.col {
            return false;
        }
        let (top, bottom) = (red.row.min(black.row), red.row.max(black.row));
        ((top + 1)..bottom).all(|row| !self.has_piece(Position::new(row, red.col)))
    }

    /// 检查某方是否被将死：被将军且没有任何合法走法
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// 检查某方是否被困毙：未被将军但没有任何合法走法
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// 走子方无子可走时的终局类型
    pub fn outcome(&self, side: Color) -> Option<Outcome> {
        if self.has_legal_move(side) {
            return None;
        }
        if self.is_in_check(side) {
            Some(Outcome::Checkmate { loser: side })
        } else {
            Some(Outcome::Stalemate { loser: side })
        }
    }

    /// 试走后走子方是否不再被将军
    ///
    /// 走子方当前未被将军时恒为 true。不符合兵种走法（含起点无子、吃己方子）返回 false。
    pub fn would_resolve_check(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if !can_move(self, from, to) {
            return false;
        }
        if !self.is_in_check(piece.color) {
            return true;
        }
        !self.in_check_after(piece.color, from, to)
    }

    /// 试走后走子方是否会被将军（如牵制子离线）
    ///
    /// 不符合兵种走法的走子不会被试走，返回 false。
    pub fn would_cause_self_check(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        can_move(self, from, to) && self.in_check_after(piece.color, from, to)
    }

    /// 完整合法性：符合走法、走后不照面、走后己方不被将军
    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if !can_move(self, from, to) {
            return false;
        }
        let mut scratch = self.clone();
        let after = scratch.scoped_move(from, to);
        !after.is_flying_general() && !after.is_in_check(piece.color)
    }

    /// 调用前须已确认 `can_move(from, to)`
    fn in_check_after(&self, color: Color, from: Position, to: Position) -> bool {
        let mut scratch = self.clone();
        let after = scratch.scoped_move(from, to);
        after.is_in_check(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceSpec, PieceType};

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_check_detection() {
        // 黑将 (4,0)，红车 (4,5) 直线将军
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Red, 4, 5),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();

        assert!(board.is_in_check(Color::Black));
        assert!(!board.is_in_check(Color::Red));
        assert!(!board.is_checkmate(Color::Black));
    }

    #[test]
    fn test_initial_position_quiet() {
        let board = Board::initial();
        assert!(!board.is_in_check(Color::Red));
        assert!(!board.is_in_check(Color::Black));
        assert!(!board.is_flying_general());
        assert!(board.outcome(Color::Red).is_none());
    }

    #[test]
    fn test_missing_king_is_not_in_check() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Red, 4, 9),
            PieceSpec::new(PieceType::Rook, Color::Red, 4, 5),
        ])
        .unwrap();

        assert!(!board.is_in_check(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
        assert!(!board.is_flying_general());
    }

    #[test]
    fn test_capturing_checker_resolves_check() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Black, 0, 5),
            PieceSpec::new(PieceType::Rook, Color::Red, 4, 5),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert!(board.is_in_check(Color::Black));

        assert!(board.would_resolve_check(p(5, 0), p(5, 4)));
        assert!(!board.would_resolve_check(p(5, 0), p(6, 0)));

        let mut after = board.clone();
        after.apply_move(p(5, 0), p(5, 4)).unwrap();
        assert!(!after.is_in_check(Color::Black));
    }

    #[test]
    fn test_resolve_check_vacuous_when_not_in_check() {
        let board = Board::initial();
        assert!(board.would_resolve_check(p(6, 0), p(5, 0)));
    }

    #[test]
    fn test_flying_general() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::King, Color::Red, 4, 9),
        ])
        .unwrap();
        assert!(board.is_flying_general());

        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Horse, Color::Red, 4, 5),
            PieceSpec::new(PieceType::King, Color::Red, 4, 9),
        ])
        .unwrap();
        assert!(!board.is_flying_general());
        // 移开唯一挡子会造成照面
        assert!(board.can_move(p(5, 4), p(3, 3)));
        assert!(!board.is_legal_move(p(5, 4), p(3, 3)));
    }

    #[test]
    fn test_king_cannot_step_into_facing() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert!(board.can_move(p(9, 3), p(9, 4)));
        assert!(!board.is_legal_move(p(9, 3), p(9, 4)));
        assert!(board.is_legal_move(p(9, 3), p(8, 3)));
    }

    #[test]
    fn test_pinned_piece_causes_self_check() {
        // 红马挡在黑车与红帅之间
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 3, 0),
            PieceSpec::new(PieceType::Rook, Color::Black, 4, 3),
            PieceSpec::new(PieceType::Horse, Color::Red, 4, 7),
            PieceSpec::new(PieceType::King, Color::Red, 4, 9),
        ])
        .unwrap();

        assert!(!board.is_in_check(Color::Red));
        assert!(board.would_cause_self_check(p(7, 4), p(5, 3)));
        assert!(!board.is_legal_move(p(7, 4), p(5, 3)));
        // 帅横走躲开车线
        assert!(!board.would_cause_self_check(p(9, 4), p(9, 5)));
        assert!(board.is_legal_move(p(9, 4), p(9, 5)));
    }

    #[test]
    fn test_hypotheticals_reject_invalid_moves() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 3, 0),
            PieceSpec::new(PieceType::Rook, Color::Black, 4, 3),
            PieceSpec::new(PieceType::Horse, Color::Red, 4, 7),
            PieceSpec::new(PieceType::Advisor, Color::Red, 3, 9),
            PieceSpec::new(PieceType::King, Color::Red, 4, 9),
        ])
        .unwrap();

        // 马不能吃己方的士，也不能直走
        assert!(!board.would_cause_self_check(p(7, 4), p(9, 3)));
        assert!(!board.would_cause_self_check(p(7, 4), p(6, 4)));
        assert!(!board.would_resolve_check(p(7, 4), p(9, 3)));
        // 空格和越界
        assert!(!board.would_resolve_check(p(5, 5), p(4, 5)));
        assert!(!board.would_cause_self_check(p(9, 4), p(10, 4)));
        // 试走不修改棋盘
        assert_eq!(board.piece_at(p(9, 3)).map(|pc| pc.kind), Some(PieceType::Advisor));

        // 被将军时，不符合走法的走子也不算解将
        let checked = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Red, 4, 5),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert!(checked.is_in_check(Color::Black));
        assert!(!checked.would_resolve_check(p(0, 4), p(2, 4)));
        assert!(checked.would_resolve_check(p(0, 4), p(0, 5)));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        // 双车错杀
        let mate = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Red, 0, 1),
            PieceSpec::new(PieceType::Rook, Color::Red, 8, 0),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert!(mate.is_in_check(Color::Black));
        assert!(mate.is_checkmate(Color::Black));
        assert!(!mate.is_stalemate(Color::Black));
        assert_eq!(
            mate.outcome(Color::Black),
            Some(Outcome::Checkmate { loser: Color::Black })
        );

        // 困毙：黑将无子可走但未被将军
        let stalemate = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Red, 3, 2),
            PieceSpec::new(PieceType::Rook, Color::Red, 5, 2),
            PieceSpec::new(PieceType::Horse, Color::Red, 2, 0),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert!(!stalemate.is_in_check(Color::Black));
        assert!(!stalemate.is_checkmate(Color::Black));
        assert!(stalemate.is_stalemate(Color::Black));
        assert_eq!(
            stalemate.outcome(Color::Black),
            Some(Outcome::Stalemate { loser: Color::Black })
        );
    }
}
