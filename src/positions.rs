//! 局面库
//!
//! 三个经典残局的摆子表，以及测试和调试用的命名 FEN 局面。
//!
//! 命名规范:
//! - START: 初始局面
//! - CHECK_n: 将军
//! - MATE_n: 杀棋（走子方一步杀）
//! - MATED_n: 走子方已被将死
//! - STALEMATE_n: 走子方被困毙

use crate::board::Board;
use crate::error::BoardError;
use crate::fen::INITIAL_FEN;
use crate::types::{
    Color::{self, Black, Red},
    PieceSpec,
    PieceType::*,
};

// =============================================================================
// 经典残局
// =============================================================================

/// 七星聚会
pub const SEVEN_STARS: &[PieceSpec] = &[
    PieceSpec::new(Rook, Black, 4, 0),
    PieceSpec::new(King, Black, 5, 0),
    PieceSpec::new(Pawn, Red, 3, 1),
    PieceSpec::new(Elephant, Black, 4, 2),
    PieceSpec::new(Pawn, Red, 5, 2),
    PieceSpec::new(Pawn, Red, 8, 5),
    PieceSpec::new(Pawn, Black, 1, 7),
    PieceSpec::new(Pawn, Black, 4, 7),
    PieceSpec::new(Pawn, Black, 3, 8),
    PieceSpec::new(Pawn, Black, 5, 8),
    PieceSpec::new(Cannon, Red, 7, 7),
    PieceSpec::new(King, Red, 4, 9),
    PieceSpec::new(Rook, Red, 6, 9),
    PieceSpec::new(Rook, Red, 7, 9),
];

/// 蚯蚓降龙
pub const EARTHWORM_DRAGON: &[PieceSpec] = &[
    PieceSpec::new(Advisor, Black, 3, 0),
    PieceSpec::new(King, Black, 4, 0),
    PieceSpec::new(Advisor, Black, 4, 1),
    PieceSpec::new(Elephant, Black, 4, 2),
    PieceSpec::new(Pawn, Black, 2, 4),
    PieceSpec::new(Rook, Red, 5, 5),
    PieceSpec::new(Pawn, Red, 8, 5),
    PieceSpec::new(Pawn, Black, 4, 8),
    PieceSpec::new(Pawn, Black, 6, 8),
    PieceSpec::new(King, Red, 5, 9),
    PieceSpec::new(Rook, Red, 8, 9),
];

/// 火烧连营
pub const FIRE_BURNING_CAMP: &[PieceSpec] = &[
    PieceSpec::new(Pawn, Red, 1, 4),
    PieceSpec::new(King, Black, 3, 0),
    PieceSpec::new(Rook, Red, 4, 1),
    PieceSpec::new(Elephant, Black, 4, 2),
    PieceSpec::new(Cannon, Red, 8, 2),
    PieceSpec::new(Rook, Red, 6, 4),
    PieceSpec::new(Cannon, Red, 7, 4),
    PieceSpec::new(Cannon, Black, 8, 4),
    PieceSpec::new(Elephant, Red, 6, 5),
    PieceSpec::new(Pawn, Black, 3, 8),
    PieceSpec::new(Pawn, Black, 4, 7),
    PieceSpec::new(Pawn, Black, 4, 8),
    PieceSpec::new(King, Red, 5, 9),
    PieceSpec::new(Pawn, Black, 7, 8),
];

/// 经典残局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endgame {
    SevenStars,
    EarthwormDragon,
    FireBurningCamp,
}

impl Endgame {
    pub const ALL: [Endgame; 3] = [
        Endgame::SevenStars,
        Endgame::EarthwormDragon,
        Endgame::FireBurningCamp,
    ];

    /// 命令行使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Endgame::SevenStars => "seven-stars",
            Endgame::EarthwormDragon => "earthworm-dragon",
            Endgame::FireBurningCamp => "fire-burning-camp",
        }
    }

    /// 中文名
    pub fn title(&self) -> &'static str {
        match self {
            Endgame::SevenStars => "七星聚会",
            Endgame::EarthwormDragon => "蚯蚓降龙",
            Endgame::FireBurningCamp => "火烧连营",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Endgame::SevenStars => "经典残局：七星聚会，考验攻防转换能力",
            Endgame::EarthwormDragon => "经典残局：蚯蚓降龙，考验精妙计算能力",
            Endgame::FireBurningCamp => "经典残局：火烧连营，考验连续攻杀技巧",
        }
    }

    /// 难度等级，1 到 5
    pub fn difficulty(&self) -> u8 {
        match self {
            Endgame::SevenStars => 4,
            Endgame::EarthwormDragon => 5,
            Endgame::FireBurningCamp => 4,
        }
    }

    /// 按命令行名称或中文名查找
    pub fn from_name(name: &str) -> Option<Endgame> {
        Endgame::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name) || e.title() == name)
    }

    pub fn specs(&self) -> &'static [PieceSpec] {
        match self {
            Endgame::SevenStars => SEVEN_STARS,
            Endgame::EarthwormDragon => EARTHWORM_DRAGON,
            Endgame::FireBurningCamp => FIRE_BURNING_CAMP,
        }
    }

    /// 残局都由红方先走
    pub fn side_to_move(&self) -> Color {
        Red
    }

    pub fn board(&self) -> Result<Board, BoardError> {
        Board::load_position(self.specs())
    }
}

// =============================================================================
// 命名 FEN 局面
// =============================================================================

/// 初始局面
pub const START: &str = INITIAL_FEN;

/// 红车在中路将军，黑方走
pub const CHECK_1: &str = "4k4/9/9/9/9/4R4/9/9/9/3K5 b";

/// 红车沉底一步杀 (i4i9)
pub const MATE_1: &str = "4k4/R8/9/9/9/8R/9/9/9/3K5 r";

/// 双车错杀，黑方已被将死
pub const MATED_1: &str = "4k3R/R8/9/9/9/9/9/9/9/3K5 b";

/// 黑将被双车和马困住，未被将军
pub const STALEMATE_1: &str = "2H1k4/9/3R1R3/9/9/9/9/9/9/3K5 b";

/// 所有命名局面
pub const ALL_FENS: &[(&str, &str)] = &[
    ("START", START),
    ("CHECK_1", CHECK_1),
    ("MATE_1", MATE_1),
    ("MATED_1", MATED_1),
    ("STALEMATE_1", STALEMATE_1),
];
