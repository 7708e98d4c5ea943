//! 随机 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::Color;
use rand::prelude::*;
use std::cell::RefCell;

/// 随机 AI - 在合法走法中均匀随机选择
///
/// 随机数生成器跨调用推进，同一实例对同一局面也会给出不同走法。
pub struct RandomAI {
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI {
            rng: RefCell::new(rng),
        }
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        let mut moves = board.legal_moves(side);
        moves.shuffle(&mut *self.rng.borrow_mut());

        // 打乱后按顺序给分，保证排序后仍是随机顺序
        let count = moves.len() as i32;
        let mut scored: Vec<ScoredMove> = moves
            .into_iter()
            .enumerate()
            .map(|(i, mv)| ScoredMove {
                mv,
                score: count - i as i32,
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_moves_are_legal() {
        let board = Board::initial();
        let ai = RandomAI::new(Some(42));
        let scored = ai.select_moves(&board, Color::Red, 5);
        assert_eq!(scored.len(), 5);
        for sm in &scored {
            assert!(board.is_legal_move(sm.mv.from, sm.mv.to));
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let board = Board::initial();
        let a = RandomAI::new(Some(7)).select_best_move(&board, Color::Black);
        let b = RandomAI::new(Some(7)).select_best_move(&board, Color::Black);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_instance_varies_across_calls() {
        let board = Board::initial();
        let ai = RandomAI::new(Some(3));
        let picks: std::collections::HashSet<_> = (0..50)
            .filter_map(|_| ai.select_best_move(&board, Color::Red))
            .collect();
        assert!(picks.len() > 5, "only {} distinct moves", picks.len());
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let board = Board::initial();
        let a = RandomAI::new(Some(11));
        let b = RandomAI::new(Some(11));
        for _ in 0..10 {
            assert_eq!(
                a.select_best_move(&board, Color::Red),
                b.select_best_move(&board, Color::Red)
            );
        }
    }

    #[test]
    fn test_covers_many_moves() {
        let board = Board::initial();
        let picks: std::collections::HashSet<_> = (0..64)
            .filter_map(|seed| RandomAI::new(Some(seed)).select_best_move(&board, Color::Red))
            .collect();
        assert!(picks.len() > 5);
    }
}
