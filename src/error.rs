//! 错误类型

use thiserror::Error;

/// 搜索及棋盘适配层的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 根局面没有合法走法（调用方应先判断终局）
    #[error("no legal moves in root position")]
    NoLegalMoves,

    /// 搜索深度既不是非负整数也不是 -1（单层启发式）
    #[error("invalid search depth: {0} (expected >= 0, or -1 for heuristic mode)")]
    InvalidSearchDepth(i64),

    #[error("unknown strategy: {0}. Available: compressor, random, heuristic, alphabeta, first, alphabetical, combo")]
    UnknownStrategy(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// 无法解析的走法字符串
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// 可以解析但在当前局面不合法
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
