//! 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、调试和基准测试
//!
//! 命名规范:
//! - START: 初始局面
//! - 开局/中局/残局：按阶段命名
//! - 特殊规则：升变、吃过路兵
//! - 终局：将死、逼和

// =============================================================================
// 开局 / 中局
// =============================================================================

/// 初始局面
pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 1. e4 之后黑方走
pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

/// 意大利开局后的中局
pub const MIDDLEGAME: &str =
    "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R w KQkq - 1 5";

// =============================================================================
// 残局
// =============================================================================

/// 王后对单王
pub const KQ_VS_K: &str = "8/8/8/4k3/8/8/3QK3/8 w - - 0 1";

/// 王兵对单王
pub const KP_VS_K: &str = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";

/// 车兵对车
pub const ROOK_ENDGAME: &str = "8/8/4k3/8/2r5/8/3PK3/5R2 b - - 0 1";

// =============================================================================
// 特殊规则
// =============================================================================

/// 唯一能升变的兵在 a7，另有王后的多个吃子走法
pub const PROMOTION: &str = "8/P7/8/8/8/3p1p2/4Q3/k1K5 w - - 0 1";

/// e5 兵可以吃过路兵 d6
pub const EN_PASSANT: &str = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";

/// 黑方 d4 兵攻击 c3/e3：白马跳 c3 会暴露在兵的攻击下
pub const PAWN_EXPOSURE: &str = "4k3/8/8/8/3p4/8/8/1N2K3 w - - 0 1";

// =============================================================================
// 终局
// =============================================================================

/// 白方被将死（愚者杀）
pub const CHECKMATED: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

/// 黑方被逼和
pub const STALEMATED: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

/// 白方一步杀（Qd8#）
pub const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/3Q2K1 w - - 0 1";

/// 所有局面（用于批量测试）
pub const ALL: &[(&str, &str)] = &[
    ("START", START),
    ("AFTER_E4", AFTER_E4),
    ("MIDDLEGAME", MIDDLEGAME),
    ("KQ_VS_K", KQ_VS_K),
    ("KP_VS_K", KP_VS_K),
    ("ROOK_ENDGAME", ROOK_ENDGAME),
    ("PROMOTION", PROMOTION),
    ("EN_PASSANT", EN_PASSANT),
    ("PAWN_EXPOSURE", PAWN_EXPOSURE),
    ("MATE_IN_ONE", MATE_IN_ONE),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, GameStatus};

    #[test]
    fn test_all_positions_parse() {
        for (name, fen) in ALL {
            let board = Board::from_fen(fen).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert_eq!(board.game_status(), GameStatus::Ongoing, "{}", name);
        }
    }
}
