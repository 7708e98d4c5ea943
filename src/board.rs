//! 象棋棋盘
//!
//! 90 个格子的数组是唯一的占位信息来源：棋子不保存坐标，
//! "所有棋子"通过遍历格子得到，因此棋盘与棋子列表不可能不一致。

use std::ops::{Deref, DerefMut};

use crate::error::BoardError;
use crate::types::{
    Color, Piece, PieceId, PieceSpec, PieceStatus, PieceType, Position, BOARD_COLS, BOARD_ROWS,
    BOARD_SIZE,
};

/// 标准开局摆子（黑上红下）
const INITIAL_SETUP: [PieceSpec; 32] = {
    use Color::{Black, Red};
    use PieceType::*;
    [
        PieceSpec::new(King, Red, 4, 9),
        PieceSpec::new(Advisor, Red, 3, 9),
        PieceSpec::new(Advisor, Red, 5, 9),
        PieceSpec::new(Elephant, Red, 2, 9),
        PieceSpec::new(Elephant, Red, 6, 9),
        PieceSpec::new(Horse, Red, 1, 9),
        PieceSpec::new(Horse, Red, 7, 9),
        PieceSpec::new(Rook, Red, 0, 9),
        PieceSpec::new(Rook, Red, 8, 9),
        PieceSpec::new(Cannon, Red, 1, 7),
        PieceSpec::new(Cannon, Red, 7, 7),
        PieceSpec::new(Pawn, Red, 0, 6),
        PieceSpec::new(Pawn, Red, 2, 6),
        PieceSpec::new(Pawn, Red, 4, 6),
        PieceSpec::new(Pawn, Red, 6, 6),
        PieceSpec::new(Pawn, Red, 8, 6),
        PieceSpec::new(King, Black, 4, 0),
        PieceSpec::new(Advisor, Black, 3, 0),
        PieceSpec::new(Advisor, Black, 5, 0),
        PieceSpec::new(Elephant, Black, 2, 0),
        PieceSpec::new(Elephant, Black, 6, 0),
        PieceSpec::new(Horse, Black, 1, 0),
        PieceSpec::new(Horse, Black, 7, 0),
        PieceSpec::new(Rook, Black, 0, 0),
        PieceSpec::new(Rook, Black, 8, 0),
        PieceSpec::new(Cannon, Black, 1, 2),
        PieceSpec::new(Cannon, Black, 7, 2),
        PieceSpec::new(Pawn, Black, 0, 3),
        PieceSpec::new(Pawn, Black, 2, 3),
        PieceSpec::new(Pawn, Black, 4, 3),
        PieceSpec::new(Pawn, Black, 6, 3),
        PieceSpec::new(Pawn, Black, 8, 3),
    ]
};

/// 走子结果，同时也是撤销凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
}

/// 棋盘（数组存储，10行 x 9列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE],
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [None; BOARD_SIZE],
        }
    }

    /// 标准开局
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for (i, spec) in INITIAL_SETUP.iter().enumerate() {
            board.squares[spec.position().to_index()] =
                Some(Piece::new(PieceId(i as u8), spec.color, spec.kind));
        }
        board
    }

    /// 按摆子列表构造棋盘，编号按列表顺序分配
    ///
    /// 坐标越界或两个子落在同一格时返回错误。
    pub fn load_position(specs: &[PieceSpec]) -> Result<Board, BoardError> {
        let mut board = Board::empty();
        for (i, spec) in specs.iter().enumerate() {
            let pos = spec.position();
            if !pos.is_valid() {
                return Err(BoardError::OutOfBounds {
                    file: spec.file,
                    rank: spec.rank,
                });
            }
            board.place(pos, Piece::new(PieceId(i as u8), spec.color, spec.kind))?;
        }
        Ok(board)
    }

    /// 在空格上放一个子
    pub(crate) fn place(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        let square = &mut self.squares[pos.to_index()];
        if square.is_some() {
            return Err(BoardError::Occupied(pos));
        }
        *square = Some(piece);
        Ok(())
    }

    /// 获取某位置的棋子，越界返回 None
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()]
    }

    /// 检查位置是否有棋子
    #[inline]
    pub fn has_piece(&self, pos: Position) -> bool {
        self.piece_at(pos).is_some()
    }

    /// 所有在盘棋子 (位置, 棋子)，行优先顺序
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, sq)| sq.map(|p| (Position::from_index(i), p)))
    }

    /// 某方所有在盘棋子
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// 找到某方的将（按格子顺序第一个）
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, p)| p.is_king())
            .map(|(pos, _)| pos)
    }

    /// 查询某编号棋子的状态
    pub fn locate(&self, id: PieceId) -> PieceStatus {
        self.pieces()
            .find(|(_, p)| p.id == id)
            .map_or(PieceStatus::Captured, |(pos, _)| PieceStatus::OnBoard(pos))
    }

    /// 执行走子（不检查规则），返回被吃的棋子
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveResult, BoardError> {
        for pos in [from, to] {
            if !pos.is_valid() {
                return Err(BoardError::OutOfBounds {
                    file: pos.col,
                    rank: pos.row,
                });
            }
        }
        if from == to {
            return Err(BoardError::SameSquare(from));
        }
        let mover = self.piece_at(from).ok_or(BoardError::EmptySquare(from))?;
        if self.piece_at(to).is_some_and(|t| t.color == mover.color) {
            return Err(BoardError::SelfCapture(to));
        }
        let captured = self.make(from, to);
        Ok(MoveResult { from, to, captured })
    }

    /// 撤销走子
    pub fn undo_move(&mut self, result: MoveResult) {
        self.unmake(result.from, result.to, result.captured);
    }

    /// 临时走子：返回的守卫在离开作用域时自动撤销
    ///
    /// 调用方需保证起点有子且两点都在棋盘内。
    pub fn scoped_move(&mut self, from: Position, to: Position) -> ScopedMove<'_> {
        debug_assert!(from.is_valid() && to.is_valid() && from != to);
        debug_assert!(self.has_piece(from));
        let captured = self.make(from, to);
        ScopedMove {
            board: self,
            from,
            to,
            captured,
        }
    }

    #[inline]
    fn make(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.squares[from.to_index()].take();
        std::mem::replace(&mut self.squares[to.to_index()], piece)
    }

    #[inline]
    fn unmake(&mut self, from: Position, to: Position, captured: Option<Piece>) {
        let piece = std::mem::replace(&mut self.squares[to.to_index()], captured);
        self.squares[from.to_index()] = piece;
    }

    /// 文本棋盘（调试用），上方为黑方
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_ROWS {
            out.push_str(&format!("{} ", 9 - row));
            for col in 0..BOARD_COLS {
                let ch = self
                    .piece_at(Position::new(row, col))
                    .map_or('.', |p| p.to_fen_char());
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h i\n");
        out
    }
}

/// 临时走子守卫，`Drop` 时恢复棋盘
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    from: Position,
    to: Position,
    captured: Option<Piece>,
}

impl ScopedMove<'_> {
    /// 本次走子吃掉的棋子
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.unmake(self.from, self.to, self.captured);
    }
}
