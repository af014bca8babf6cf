//! PSQT Chess AI
//!
//! 基于位置表（piece-square table）的国际象棋选着引擎：
//! 单层启发式排序、固定深度 Alpha-Beta 搜索，支持 FEN 输入输出

pub mod ai;
pub mod board;
pub mod error;
pub mod fen;
pub mod position;
pub mod psqt;
pub mod test_positions;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use ai::{
    alpha_beta_search, score_move, score_moves, score_position, strategies_help, AIConfig,
    AIEngine, Clock, MoveScore, PlayResult, ScoredMove, SearchMode, SearchRequest, SearchResult,
    Value, AVAILABLE_STRATEGIES, DEFAULT_STRATEGY, INFINITY, NEG_INFINITY,
};
pub use board::{Board, GameStatus};
pub use error::SearchError;
pub use fen::{apply_move_to_fen, fen_status, get_legal_moves_from_fen, parse_fen};
pub use position::{MoveGuard, Position};
pub use types::{Color, Move, PieceType, Square, SquareSet};
