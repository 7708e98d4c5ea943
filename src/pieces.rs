//! 棋子走法规则
//!
//! 每种兵种一个判定函数，通过 [`rule_for`] 统一分派。
//! 所有判定只读棋盘，不修改任何状态。

use crate::board::Board;
use crate::types::{Color, Piece, PieceType, Position};

/// 走法判定函数：(棋盘, 走子, 起点, 终点) -> 是否符合该兵种走法
pub type MoveRule = fn(&Board, Piece, Position, Position) -> bool;

/// 兵种到判定函数的分派表
pub fn rule_for(kind: PieceType) -> MoveRule {
    match kind {
        PieceType::King => king_can_move,
        PieceType::Advisor => advisor_can_move,
        PieceType::Elephant => elephant_can_move,
        PieceType::Horse => horse_can_move,
        PieceType::Rook => rook_can_move,
        PieceType::Cannon => cannon_can_move,
        PieceType::Pawn => pawn_can_move,
    }
}

/// 起点上的棋子能否按其走法走到终点
///
/// 起点无子、越界、原地不动、终点是己方棋子都返回 false。
pub fn can_move(board: &Board, from: Position, to: Position) -> bool {
    if !from.is_valid() || !to.is_valid() || from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if board.piece_at(to).is_some_and(|t| t.color == piece.color) {
        return false;
    }
    rule_for(piece.kind)(board, piece, from, to)
}

/// 起点到终点之间（不含两端）的棋子数，仅用于同行或同列
fn count_between(board: &Board, from: Position, to: Position) -> usize {
    let dr = (to.row - from.row).signum();
    let dc = (to.col - from.col).signum();
    let mut pos = from.offset(dr, dc);
    let mut count = 0;
    while pos != to {
        if board.has_piece(pos) {
            count += 1;
        }
        pos = pos.offset(dr, dc);
    }
    count
}

#[inline]
fn is_straight_line(from: Position, to: Position) -> bool {
    from.row == to.row || from.col == to.col
}

fn king_can_move(_board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    dr + dc == 1 && to.is_in_palace(piece.color)
}

fn advisor_can_move(_board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    dr == 1 && dc == 1 && to.is_in_palace(piece.color)
}

fn elephant_can_move(board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    if dr.abs() != 2 || dc.abs() != 2 {
        return false;
    }
    // 不能过河
    if !to.is_on_own_side(piece.color) {
        return false;
    }
    // 象眼
    !board.has_piece(from.offset(dr / 2, dc / 2))
}

fn horse_can_move(board: &Board, _piece: Piece, from: Position, to: Position) -> bool {
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    // 马腿在长边方向上紧挨起点
    let leg = match (dr.abs(), dc.abs()) {
        (2, 1) => from.offset(dr / 2, 0),
        (1, 2) => from.offset(0, dc / 2),
        _ => return false,
    };
    !board.has_piece(leg)
}

fn rook_can_move(board: &Board, _piece: Piece, from: Position, to: Position) -> bool {
    is_straight_line(from, to) && count_between(board, from, to) == 0
}

fn cannon_can_move(board: &Board, _piece: Piece, from: Position, to: Position) -> bool {
    if !is_straight_line(from, to) {
        return false;
    }
    let between = count_between(board, from, to);
    if board.has_piece(to) {
        // 吃子必须隔一个炮架
        between == 1
    } else {
        between == 0
    }
}

fn pawn_can_move(_board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    if dc == 0 && dr == piece.color.forward() {
        return true;
    }
    // 过河后可以左右走一步
    dr == 0 && dc.abs() == 1 && has_crossed_river(piece.color, from)
}

/// 兵是否已过河
#[inline]
pub fn has_crossed_river(color: Color, pos: Position) -> bool {
    !pos.is_on_own_side(color)
}
