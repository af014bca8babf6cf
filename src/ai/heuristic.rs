//! 单层启发式 AI 策略

use super::scoring::{score_moves, ScoredMove};
use super::sort_and_truncate;
use crate::position::Position;
use crate::types::Move;

/// 单层启发式 AI - 按打包分数稳定降序排序，取第一个
///
/// 分数相同的走法保持生成顺序，先生成的排在前面
pub struct HeuristicAI;

impl HeuristicAI {
    /// 分数最高的 n 个走法
    pub fn select_moves<P: Position>(&self, position: &P, n: usize) -> Vec<ScoredMove> {
        let mut scored = score_moves(position);
        sort_and_truncate(&mut scored, n);
        scored
    }

    pub fn select_best_move<P: Position>(&self, position: &P) -> Option<Move> {
        self.select_moves(position, 1).first().map(|sm| sm.mv)
    }
}
