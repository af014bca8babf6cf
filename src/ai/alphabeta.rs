//! 固定深度 Alpha-Beta 搜索
//!
//! - 不做走法排序，按局面给出的顺序搜索
//! - 深度 0 的叶子用 [`score_position`]（当前行棋方最好走法的启发式分数）
//! - 没有合法走法的节点无论 max/min 都返回 [`NEG_INFINITY`]
//! - 剪枝条件看刚返回的子节点分数：max 节点 `beta < s`，min 节点 `s <= alpha`

use log::{debug, trace};

use super::scoring::{score_position, Value, INFINITY, NEG_INFINITY};
use crate::position::{MoveGuard, Position};
use crate::types::Move;

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 根节点最佳走法，根局面没有合法走法时为 None
    pub best_move: Option<Move>,
    /// 根节点分数
    pub value: Value,
    /// 搜索过的子局面数（每次 push 计一次）
    pub nodes: u64,
}

/// Alpha-Beta 搜索器
pub struct AlphaBeta {
    depth: i32,
    nodes: u64,
}

impl AlphaBeta {
    pub fn new(depth: i32) -> Self {
        AlphaBeta { depth, nodes: 0 }
    }

    /// 从根节点搜索（max 节点，窗口为 (-inf, +inf)）
    pub fn search_root<P: Position>(mut self, position: &mut P) -> SearchResult {
        let (best_move, value) = self.search(self.depth, position, true, NEG_INFINITY, INFINITY);
        debug!(
            "alpha-beta depth={} best={:?} value={} nodes={}",
            self.depth,
            best_move.map(|m| m.to_uci()),
            value,
            self.nodes
        );
        SearchResult {
            best_move,
            value,
            nodes: self.nodes,
        }
    }

    /// 递归搜索，返回 (最佳走法, 分数)
    pub(crate) fn search<P: Position>(
        &mut self,
        depth: i32,
        position: &mut P,
        maximizing: bool,
        mut alpha: Value,
        mut beta: Value,
    ) -> (Option<Move>, Value) {
        if depth <= 0 {
            return (None, score_position(position));
        }

        let legal_moves = position.legal_moves();
        let Some(&first) = legal_moves.first() else {
            return (None, NEG_INFINITY);
        };

        let mut best_move = first;
        let mut best_value = if maximizing { NEG_INFINITY } else { INFINITY };

        for mv in legal_moves {
            self.nodes += 1;
            let (_, s) = {
                let mut guard = MoveGuard::new(position, mv);
                self.search(depth - 1, guard.position(), !maximizing, alpha, beta)
            };

            if maximizing {
                if s > best_value {
                    best_value = s;
                    best_move = mv;
                }
                alpha = alpha.max(best_value);
                if beta < s {
                    trace!("max cutoff at depth {}: {} > beta {}", depth, s, beta);
                    break;
                }
            } else {
                if s < best_value {
                    best_value = s;
                    best_move = mv;
                }
                beta = beta.min(best_value);
                if s <= alpha {
                    trace!("min cutoff at depth {}: {} <= alpha {}", depth, s, alpha);
                    break;
                }
            }
        }

        (Some(best_move), best_value)
    }
}

/// 以固定深度搜索
pub fn search<P: Position>(position: &mut P, depth: u32) -> SearchResult {
    AlphaBeta::new(depth.min(i32::MAX as u32) as i32).search_root(position)
}
