//! 走法评分与局面评分
//!
//! 走法分数按优先级打包成一个 i64（高位优先）：
//!
//! | 字段       | 位移 | 说明                                   |
//! |------------|------|----------------------------------------|
//! | 升变       | 26   | 升变子的等级，没有为 0                 |
//! | 吃子       | 25   | 0/1                                    |
//! | 兵威胁     | 22   | 目标格不受敌兵攻击为 6，否则 5 - 等级  |
//! | 位置分变化 | 12   | 另加常量 512                           |
//! | 目标格     | 6    |                                        |
//! | 起始格     | 0    |                                        |
//!
//! 常量 512 落在目标格字段的位上，但每个走法都加同一个值，不影响比较结果。

use crate::position::Position;
use crate::psqt::move_value;
use crate::types::{Move, PieceType};

/// 搜索值
pub type Value = i64;

/// 正无穷（任何打包分数都达不到）
pub const INFINITY: Value = i64::MAX;

/// 负无穷：当前行棋方没有合法走法（将死与逼和不区分）
pub const NEG_INFINITY: Value = -i64::MAX;

/// 目标格不受敌兵攻击时的兵威胁等级
pub const UNEXPOSED: i64 = 6;

/// 打包时加在位置分变化上的常量
pub const DELTA_BIAS: i64 = 512;

const PROMOTION_SHIFT: u32 = 26;
const CAPTURE_SHIFT: u32 = 25;
const EXPOSURE_SHIFT: u32 = 22;
const DELTA_SHIFT: u32 = 12;
const TO_SHIFT: u32 = 6;

/// 走法评分的各个字段
///
/// 字段声明顺序即比较优先级，派生的 `Ord` 与 [`MoveScore::packed`] 的大小关系一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoveScore {
    pub promotion: i64,
    pub capture: bool,
    pub exposure: i64,
    pub delta: i64,
    pub to: u8,
    pub from: u8,
}

impl MoveScore {
    /// 打包成单个整数
    pub fn packed(&self) -> Value {
        (self.promotion << PROMOTION_SHIFT)
            + ((self.capture as i64) << CAPTURE_SHIFT)
            + (self.exposure << EXPOSURE_SHIFT)
            + DELTA_BIAS
            + (self.delta << DELTA_SHIFT)
            + ((self.to as i64) << TO_SHIFT)
            + self.from as i64
    }
}

/// 带分数的走法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: Value,
}

/// 兵威胁等级
///
/// 目标格没有敌兵攻击时为 [`UNEXPOSED`]，否则为 `5 - 走子等级`：
/// 高价值棋子走到敌兵攻击的格子排得更靠后，兵走到这种格子相对靠前
pub fn pawn_exposure<P: Position>(position: &P, mv: &Move) -> i64 {
    let enemy = position.turn().opposite();
    let exposed = position.pieces(PieceType::Pawn, enemy) & position.attackers(enemy, mv.to);
    if exposed.is_empty() {
        UNEXPOSED
    } else {
        let moving = position.piece_type_at(mv.from);
        debug_assert!(moving.is_some(), "move {} starts on an empty square", mv);
        5 - moving.map_or(0, |p| p.rank())
    }
}

/// 计算走法的各个评分字段
pub fn evaluate_move<P: Position>(position: &P, mv: &Move) -> MoveScore {
    MoveScore {
        promotion: mv.promotion.map_or(0, |p| p.rank()),
        capture: position.is_capture(mv),
        exposure: pawn_exposure(position, mv),
        delta: move_value(position, mv) as i64,
        to: mv.to.index() as u8,
        from: mv.from.index() as u8,
    }
}

/// 走法的打包分数
#[inline]
pub fn score_move<P: Position>(position: &P, mv: &Move) -> Value {
    evaluate_move(position, mv).packed()
}

/// 局面分数：当前行棋方最好走法的分数，没有合法走法时为 [`NEG_INFINITY`]
///
/// 叶子节点直接复用走法排序的启发式，不做子力评估
pub fn score_position<P: Position>(position: &P) -> Value {
    position
        .legal_moves()
        .iter()
        .map(|mv| score_move(position, mv))
        .max()
        .unwrap_or(NEG_INFINITY)
}

/// 给所有合法走法打分，保持生成顺序
pub fn score_moves<P: Position>(position: &P) -> Vec<ScoredMove> {
    position
        .legal_moves()
        .into_iter()
        .map(|mv| ScoredMove {
            mv,
            score: score_move(position, &mv),
        })
        .collect()
}
