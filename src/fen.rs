//! FEN 解析和生成
//!
//! 格式: `<棋盘> <走子方>`，其余字段忽略
//!
//! 棋盘从上往下依次是 row 0（黑方底线）到 row 9（红方底线）：
//! - 红方：K(帅) A(仕) E(相) H(马) R(车) C(炮) P(兵)
//! - 黑方：k a e h r c p
//! - 兼容标准 FEN 的 B/N 作为象/马
//! - 空格：数字 (1-9)
//!
//! 走子方：`r`/`w` 红方，`b` 黑方，省略时为红方。

use crate::board::Board;
use crate::error::{FenError, GameError};
use crate::types::{
    parse_iccs_move, Color, PieceSpec, PieceType, Position, BOARD_COLS, BOARD_ROWS,
};

/// 标准开局 FEN
pub const INITIAL_FEN: &str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

/// FEN 解析后的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenState {
    pub board: Board,
    pub turn: Color,
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState, FenError> {
    let mut parts = fen.split_whitespace();
    let board_str = parts.next().ok_or(FenError::Empty)?;

    let specs = parse_board(board_str)?;
    let board = Board::load_position(&specs)?;

    let turn = match parts.next() {
        None => Color::Red,
        Some(side) => {
            let mut chars = side.chars();
            match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                (Some(color), None) => color,
                _ => return Err(FenError::InvalidSide(side.to_string())),
            }
        }
    };

    Ok(FenState { board, turn })
}

fn parse_board(board_str: &str) -> Result<Vec<PieceSpec>, FenError> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != BOARD_ROWS as usize {
        return Err(FenError::RowCount(rows.len()));
    }

    let mut specs = Vec::with_capacity(32);

    for (row, row_str) in rows.iter().enumerate() {
        let mut col: usize = 0;

        for ch in row_str.chars() {
            if let Some(n) = ch.to_digit(10) {
                if n == 0 {
                    return Err(FenError::InvalidPiece(ch));
                }
                col += n as usize;
            } else {
                let kind = PieceType::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::Red
                } else {
                    Color::Black
                };
                if col < BOARD_COLS as usize {
                    specs.push(PieceSpec::new(kind, color, col as i8, row as i8));
                }
                col += 1;
            }
        }

        if col != BOARD_COLS as usize {
            return Err(FenError::RowWidth { row, cols: col });
        }
    }

    Ok(specs)
}

/// 生成 FEN 字符串
pub fn to_fen(board: &Board, turn: Color) -> String {
    let mut rows = Vec::with_capacity(BOARD_ROWS as usize);

    for row in 0..BOARD_ROWS {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for col in 0..BOARD_COLS {
            if let Some(piece) = board.piece_at(Position::new(row, col)) {
                if empty_count > 0 {
                    row_str.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                row_str.push(piece.to_fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    format!("{} {}", rows.join("/"), turn.to_fen_char())
}

/// 在 FEN 上执行合法走法，返回新的 FEN
pub fn apply_move_to_fen(fen: &str, move_str: &str) -> Result<String, GameError> {
    let state = parse_fen(fen)?;
    let (from, to) = parse_iccs_move(move_str)
        .ok_or_else(|| GameError::InvalidMoveString(move_str.to_string()))?;

    let mv = state
        .board
        .find_legal_move(state.turn, from, to)
        .ok_or(GameError::IllegalMove { from, to })?;

    let mut board = state.board;
    board.apply_move(mv.from, mv.to)?;
    Ok(to_fen(&board, state.turn.opposite()))
}

impl Board {
    /// 从 FEN 构造棋盘（忽略走子方）
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        parse_fen(fen).map(|state| state.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initial_fen() {
        let state = parse_fen(INITIAL_FEN).unwrap();
        assert_eq!(state.turn, Color::Red);
        assert_eq!(state.board.pieces().count(), 32);

        // 与标准开局摆子一致（编号不同，只比较兵种和阵营）
        let initial = Board::initial();
        for pos in Position::all() {
            let a = state.board.piece_at(pos).map(|p| (p.color, p.kind));
            let b = initial.piece_at(pos).map(|p| (p.color, p.kind));
            assert_eq!(a, b, "{}", pos);
        }
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "3akab2/9/4e4/p3p1C1p/2p3h2/6P2/P3P3P/4E4/4A4/2RAK4 b";
        let state = parse_fen(fen).unwrap();
        assert_eq!(state.turn, Color::Black);
        assert_eq!(
            to_fen(&state.board, state.turn),
            "3akae2/9/4e4/p3p1C1p/2p3h2/6P2/P3P3P/4E4/4A4/2RAK4 b"
        );

        assert_eq!(to_fen(&Board::initial(), Color::Red), INITIAL_FEN);
    }

    #[test]
    fn test_side_defaults_and_extra_fields() {
        let state = parse_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert_eq!(state.turn, Color::Red);

        let state = parse_fen("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1").unwrap();
        assert_eq!(state.turn, Color::Red);
        assert_eq!(state.board.find_king(Color::Black), Some(Position::new(0, 4)));
        assert_eq!(state.board.find_king(Color::Red), Some(Position::new(9, 4)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_fen(""), Err(FenError::Empty));
        assert_eq!(parse_fen("4k4/9/9 r"), Err(FenError::RowCount(3)));
        assert_eq!(
            parse_fen("4k4/9/9/9/9/9/9/9/9/4K3 r"),
            Err(FenError::RowWidth { row: 9, cols: 8 })
        );
        assert_eq!(
            parse_fen("4k5/9/9/9/9/9/9/9/9/4K4 r"),
            Err(FenError::RowWidth { row: 0, cols: 10 })
        );
        assert_eq!(
            parse_fen("4x4/9/9/9/9/9/9/9/9/4K4 r"),
            Err(FenError::InvalidPiece('x'))
        );
        assert_eq!(
            parse_fen("4k4/9/9/9/9/9/9/9/9/4K4 x"),
            Err(FenError::InvalidSide("x".to_string()))
        );
    }

    #[test]
    fn test_apply_move() {
        let fen = apply_move_to_fen(INITIAL_FEN, "h2e2").unwrap();
        assert_eq!(
            fen,
            "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RHEAKAEHR b"
        );

        let fen = apply_move_to_fen(&fen, "h7e7").unwrap();
        assert_eq!(
            fen,
            "rheakaehr/9/1c2c4/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RHEAKAEHR r"
        );

        // 轮到红方时不能走黑子
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "h7e7"),
            Err(GameError::IllegalMove { .. })
        ));
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "zz"),
            Err(GameError::InvalidMoveString(_))
        ));
    }
}
