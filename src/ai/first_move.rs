//! 按 UCI / SAN 字符串排序取第一个走法，以及随机/FirstMove 组合的切换规则

use super::Clock;
use crate::position::Position;
use crate::types::Move;

/// 组合策略的切换阈值：`剩余分钟 + 加秒` 超过该值时随机走
pub const COMBO_THRESHOLD_SECS: f64 = 10.0;

/// FirstMove AI - 合法走法按 UCI 字符串排序，取最小的
pub struct FirstMoveAI;

impl FirstMoveAI {
    pub fn select_best_move<P: Position>(&self, position: &P) -> Option<Move> {
        self.select_from(position.legal_moves())
    }

    pub fn select_from(&self, moves: Vec<Move>) -> Option<Move> {
        moves.into_iter().min_by_key(|m| m.to_uci())
    }
}

/// Alphabetical AI - 合法走法按 SAN 排序取最小；局面不提供 SAN 时退回 UCI
pub struct AlphabeticalAI;

impl AlphabeticalAI {
    pub fn select_best_move<P: Position>(&self, position: &P) -> Option<Move> {
        position
            .legal_moves()
            .into_iter()
            .min_by_key(|m| position.san(m).unwrap_or_else(|| m.to_uci()))
    }
}

/// 组合策略是否随机走（没有棋钟时剩余时间按 0 计）
pub fn combo_prefers_random(clock: Option<&Clock>) -> bool {
    match clock {
        Some(clock) => {
            clock.remaining.as_secs_f64() / 60.0 + clock.increment.as_secs_f64()
                > COMBO_THRESHOLD_SECS
        }
        None => false,
    }
}
