//! 局面评估：子力 + 位置表 + 机动性 + 中心控制

use crate::board::Board;
use crate::pieces::has_crossed_river;
use crate::types::{Color, PieceType, Position};

/// 过河兵额外加分
pub const CROSSED_PAWN_BONUS: i32 = 40;

/// 每个合法走法差的机动性分
pub const MOBILITY_WEIGHT: i32 = 2;

/// 中心区域每个己方棋子的加分
pub const CENTER_BONUS: i32 = 8;

/// PST (Piece-Square Table)，从红方视角：row 0 是黑方底线
type PstTable = [[i32; 9]; 10];

/// 兵：过河后越靠近九宫越好，沉底兵价值下降
const PST_PAWN: PstTable = [
    [0, 2, 4, 6, 8, 6, 4, 2, 0],
    [6, 10, 14, 18, 20, 18, 14, 10, 6],
    [6, 10, 14, 16, 18, 16, 14, 10, 6],
    [4, 8, 10, 12, 14, 12, 10, 8, 4],
    [2, 4, 6, 8, 10, 8, 6, 4, 2],
    [0, 0, 0, 2, 2, 2, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 车：占肋道和河口，边角稍差
const PST_ROOK: PstTable = [
    [4, 6, 5, 8, 8, 8, 5, 6, 4],
    [4, 8, 6, 10, 12, 10, 6, 8, 4],
    [2, 4, 4, 8, 8, 8, 4, 4, 2],
    [2, 6, 6, 8, 8, 8, 6, 6, 2],
    [4, 6, 6, 8, 10, 8, 6, 6, 4],
    [4, 6, 6, 8, 10, 8, 6, 6, 4],
    [0, 4, 2, 6, 6, 6, 2, 4, 0],
    [-2, 4, 2, 6, 6, 6, 2, 4, -2],
    [2, 4, 2, 6, 0, 6, 2, 4, 2],
    [-4, 4, 2, 6, 0, 6, 2, 4, -4],
];

/// 评估开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// 计入双方合法走法数之差
    pub use_mobility: bool,
    /// 计入中心区域的己方棋子
    pub use_center_control: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            use_mobility: true,
            use_center_control: true,
        }
    }
}

/// 位置表分数（黑方按行镜像）
#[inline]
fn pst_bonus(kind: PieceType, color: Color, pos: Position) -> i32 {
    let row = match color {
        Color::Red => pos.row as usize,
        Color::Black => (9 - pos.row) as usize,
    };
    let col = pos.col as usize;
    match kind {
        PieceType::Pawn => PST_PAWN[row][col],
        PieceType::Rook => PST_ROOK[row][col],
        _ => 0,
    }
}

#[inline]
fn is_center(pos: Position) -> bool {
    (3..=5).contains(&pos.col) && (3..=6).contains(&pos.row)
}

/// 局面评估器
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// 从 `color` 视角评估局面，正数对 `color` 有利
    ///
    /// 满足 `evaluate(b, Red) == -evaluate(b, Black)`。
    pub fn evaluate(&self, board: &Board, color: Color) -> i32 {
        let mut score = material(board, color);

        if self.config.use_mobility {
            let own = board.count_legal_moves(color) as i32;
            let opp = board.count_legal_moves(color.opposite()) as i32;
            score += (own - opp) * MOBILITY_WEIGHT;
        }

        if self.config.use_center_control {
            score += center_control(board, color) - center_control(board, color.opposite());
        }

        score
    }
}

/// 子力与位置分之差
pub fn material(board: &Board, color: Color) -> i32 {
    board
        .pieces()
        .map(|(pos, piece)| {
            let mut value = piece.kind.value() + pst_bonus(piece.kind, piece.color, pos);
            if piece.kind == PieceType::Pawn && has_crossed_river(piece.color, pos) {
                value += CROSSED_PAWN_BONUS;
            }
            if piece.color == color {
                value
            } else {
                -value
            }
        })
        .sum()
}

fn center_control(board: &Board, color: Color) -> i32 {
    board
        .pieces_of(color)
        .filter(|(pos, _)| is_center(*pos))
        .count() as i32
        * CENTER_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceSpec;

    #[test]
    fn test_initial_position_balanced() {
        let board = Board::initial();
        let eval = Evaluator::default();
        assert_eq!(eval.evaluate(&board, Color::Red), 0);
        assert_eq!(eval.evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Rook, Color::Red, 0, 3),
            PieceSpec::new(PieceType::Pawn, Color::Red, 4, 4),
            PieceSpec::new(PieceType::Horse, Color::Black, 2, 5),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        let eval = Evaluator::default();
        assert_eq!(
            eval.evaluate(&board, Color::Red),
            -eval.evaluate(&board, Color::Black)
        );
        assert!(eval.evaluate(&board, Color::Red) > 0);
    }

    #[test]
    fn test_rook_material() {
        let no_rook = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
            PieceSpec::new(PieceType::Rook, Color::Red, 0, 9),
        ])
        .unwrap();
        let kings_only = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        assert_eq!(
            material(&no_rook, Color::Red) - material(&kings_only, Color::Red),
            500 + PST_ROOK[9][0]
        );
    }

    #[test]
    fn test_crossed_pawn_bonus() {
        let home = Board::load_position(&[PieceSpec::new(PieceType::Pawn, Color::Red, 0, 6)])
            .unwrap();
        let crossed = Board::load_position(&[PieceSpec::new(PieceType::Pawn, Color::Red, 0, 4)])
            .unwrap();
        assert_eq!(material(&home, Color::Red), 30);
        assert_eq!(
            material(&crossed, Color::Red),
            30 + CROSSED_PAWN_BONUS + PST_PAWN[4][0]
        );

        // 黑卒镜像：rank 5 已过河
        let black = Board::load_position(&[PieceSpec::new(PieceType::Pawn, Color::Black, 4, 5)])
            .unwrap();
        assert_eq!(
            material(&black, Color::Black),
            30 + CROSSED_PAWN_BONUS + PST_PAWN[4][4]
        );
    }

    #[test]
    fn test_center_and_mobility_toggles() {
        let board = Board::load_position(&[
            PieceSpec::new(PieceType::King, Color::Black, 4, 0),
            PieceSpec::new(PieceType::Horse, Color::Red, 4, 5),
            PieceSpec::new(PieceType::King, Color::Red, 3, 9),
        ])
        .unwrap();
        let plain = Evaluator::new(EvalConfig {
            use_mobility: false,
            use_center_control: false,
        });
        let center = Evaluator::new(EvalConfig {
            use_mobility: false,
            use_center_control: true,
        });
        let mobility = Evaluator::new(EvalConfig {
            use_mobility: true,
            use_center_control: false,
        });

        let base = plain.evaluate(&board, Color::Red);
        assert_eq!(base, material(&board, Color::Red));
        assert_eq!(center.evaluate(&board, Color::Red), base + CENTER_BONUS);

        let own = board.count_legal_moves(Color::Red) as i32;
        let opp = board.count_legal_moves(Color::Black) as i32;
        assert_eq!(
            mobility.evaluate(&board, Color::Red),
            base + (own - opp) * MOBILITY_WEIGHT
        );
    }
}
