//! 随机 AI 策略

use crate::position::Position;
use crate::types::Move;
use rand::prelude::*;

/// 随机 AI - 在合法走法中均匀随机选择
pub struct RandomAI {
    rng: StdRng,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI { rng }
    }

    pub fn select_move<P: Position>(&mut self, position: &P) -> Option<Move> {
        self.select_from(&position.legal_moves())
    }

    /// 在给定的候选走法中随机选
    pub fn select_from(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::test_positions;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::from_fen(test_positions::MIDDLEGAME).unwrap();
        let legal = board.legal_moves();
        let mut ai = RandomAI::new(Some(42));
        for _ in 0..20 {
            let mv = ai.select_move(&board).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = Board::default();
        let mut a = RandomAI::new(Some(7));
        let mut b = RandomAI::new(Some(7));
        for _ in 0..10 {
            assert_eq!(a.select_move(&board), b.select_move(&board));
        }
    }

    #[test]
    fn test_covers_several_moves() {
        let board = Board::default();
        let mut ai = RandomAI::new(Some(1));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(ai.select_move(&board).unwrap());
        }
        assert!(seen.len() > 10);
    }

    #[test]
    fn test_select_from_candidates() {
        let candidates = [Move::from_uci("e2e4").unwrap(), Move::from_uci("d2d4").unwrap()];
        let mut ai = RandomAI::new(Some(5));
        for _ in 0..20 {
            assert!(candidates.contains(&ai.select_from(&candidates).unwrap()));
        }
        assert_eq!(ai.select_from(&[]), None);
    }

    #[test]
    fn test_no_moves() {
        let board = Board::from_fen(test_positions::STALEMATED).unwrap();
        assert_eq!(RandomAI::new(Some(3)).select_move(&board), None);
    }
}
