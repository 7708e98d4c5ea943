//! 象棋核心类型定义
//!
//! 棋盘坐标：row 0 是黑方底线（上方），row 9 是红方底线（下方）；
//! col 0-8 从左到右。

use std::fmt;

/// 棋盘行数
pub const BOARD_ROWS: i8 = 10;
/// 棋盘列数
pub const BOARD_COLS: i8 = 9;
/// 格子总数
pub const BOARD_SIZE: usize = 90;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 从 FEN 走子方字符解析（`w` 兼容标准 FEN）
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'r' | 'w' => Some(Color::Red),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Black => 'b',
        }
    }

    /// 兵前进方向（行增量）
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// 将/帅
    King,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马
    Horse,
    /// 车
    Rook,
    /// 炮
    Cannon,
    /// 卒/兵
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::King,
        PieceType::Advisor,
        PieceType::Elephant,
        PieceType::Horse,
        PieceType::Rook,
        PieceType::Cannon,
        PieceType::Pawn,
    ];

    /// 从 FEN 字符解析（大小写均可，兼容标准 FEN 的 b/n）
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'a' => Some(PieceType::Advisor),
            'e' | 'b' => Some(PieceType::Elephant),
            'h' | 'n' => Some(PieceType::Horse),
            'r' => Some(PieceType::Rook),
            'c' => Some(PieceType::Cannon),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Advisor => 'a',
            PieceType::Elephant => 'e',
            PieceType::Horse => 'h',
            PieceType::Rook => 'r',
            PieceType::Cannon => 'c',
            PieceType::Pawn => 'p',
        }
    }

    /// 棋子基础价值
    pub fn value(&self) -> i32 {
        match self {
            PieceType::King => 10000,
            PieceType::Rook => 500,
            PieceType::Cannon => 285,
            PieceType::Horse => 270,
            PieceType::Elephant => 120,
            PieceType::Advisor => 120,
            PieceType::Pawn => 30,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::King => "King",
            PieceType::Advisor => "Advisor",
            PieceType::Elephant => "Elephant",
            PieceType::Horse => "Horse",
            PieceType::Rook => "Rook",
            PieceType::Cannon => "Cannon",
            PieceType::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0-9 (0 是黑方底线，9 是红方底线)
/// col: 0-8 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_ROWS).contains(&self.row) && (0..BOARD_COLS).contains(&self.col)
    }

    /// 检查位置是否在某方九宫格内
    pub fn is_in_palace(&self, color: Color) -> bool {
        if !(3..=5).contains(&self.col) {
            return false;
        }
        match color {
            Color::Red => (7..=9).contains(&self.row),
            Color::Black => (0..=2).contains(&self.row),
        }
    }

    /// 检查位置是否在某方己方半场（未过河）
    pub fn is_on_own_side(&self, color: Color) -> bool {
        match color {
            Color::Red => (5..=9).contains(&self.row),
            Color::Black => (0..=4).contains(&self.row),
        }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 转换为数组索引（调用方保证位置合法）
    #[inline]
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_COLS as usize + self.col as usize
    }

    /// 从数组索引还原
    #[inline]
    pub fn from_index(index: usize) -> Position {
        Position {
            row: (index / BOARD_COLS as usize) as i8,
            col: (index % BOARD_COLS as usize) as i8,
        }
    }

    /// 全部 90 个格子，按行优先顺序
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(Position::from_index)
    }

    /// 从 ICCS 坐标解析（如 "h2"，数字从红方底线起算）
    pub fn from_iccs(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0] {
            b'a'..=b'i' => (bytes[0] - b'a') as i8,
            _ => return None,
        };
        let rank = match bytes[1] {
            b'0'..=b'9' => (bytes[1] - b'0') as i8,
            _ => return None,
        };
        Some(Position::new(9 - rank, col))
    }

    /// 转换为 ICCS 坐标
    pub fn to_iccs(&self) -> String {
        let col_char = (b'a' + self.col as u8) as char;
        format!("{}{}", col_char, 9 - self.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs())
    }
}

/// 棋子的稳定编号（按摆子顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

/// 棋子：身份、阵营、兵种。位置由所在格子决定，不单独保存。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub fn new(id: PieceId, color: Color, kind: PieceType) -> Self {
        Piece { id, color, kind }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceType::King
    }

    /// FEN 字符：红方大写，黑方小写
    pub fn to_fen_char(&self) -> char {
        let ch = self.kind.to_fen_char();
        match self.color {
            Color::Red => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    /// 可读名称，例如 `Red Rook#7`
    pub fn name(&self) -> String {
        format!("{} {}#{}", self.color, self.kind, self.id.0)
    }
}

/// 棋子状态：在棋盘上或已被吃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceStatus {
    OnBoard(Position),
    Captured,
}

/// 摆子描述 (兵种, 阵营, 列, 行)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    pub kind: PieceType,
    pub color: Color,
    /// 列 (x)
    pub file: i8,
    /// 行 (y)
    pub rank: i8,
}

impl PieceSpec {
    pub const fn new(kind: PieceType, color: Color, file: i8, rank: i8) -> Self {
        PieceSpec {
            kind,
            color,
            file,
            rank,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.rank, self.file)
    }
}

/// 走法：走子、起点、终点、被吃的子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 是否吃掉对方将帅
    #[inline]
    pub fn captures_king(&self) -> bool {
        self.captured.is_some_and(|c| c.is_king())
    }

    /// ICCS 走法字符串，如 `h2e2`
    pub fn to_iccs(&self) -> String {
        format!("{}{}", self.from.to_iccs(), self.to.to_iccs())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs())
    }
}

/// 解析 ICCS 走法字符串，返回 (起点, 终点)
pub fn parse_iccs_move(s: &str) -> Option<(Position, Position)> {
    let s = s.trim();
    if s.len() != 4 || !s.is_ascii() {
        return None;
    }
    let from = Position::from_iccs(&s[0..2])?;
    let to = Position::from_iccs(&s[2..4])?;
    Some((from, to))
}

/// 无子可走时的终局类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 被将死
    Checkmate { loser: Color },
    /// 困毙（无子可走但未被将军）
    Stalemate { loser: Color },
}

impl Outcome {
    pub fn loser(&self) -> Color {
        match self {
            Outcome::Checkmate { loser } | Outcome::Stalemate { loser } => *loser,
        }
    }

    pub fn winner(&self) -> Color {
        self.loser().opposite()
    }
}
