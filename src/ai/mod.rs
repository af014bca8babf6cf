//! AI 策略模块
//!
//! 提供随机、单层启发式、固定深度 Alpha-Beta、按名称排序等选着策略，
//! 通过 [`AIEngine`] 统一调度

mod alphabeta;
mod first_move;
mod heuristic;
mod random;
pub mod scoring;

pub use alphabeta::{search as alpha_beta_search, AlphaBeta, SearchResult};
pub use first_move::{combo_prefers_random, AlphabeticalAI, FirstMoveAI, COMBO_THRESHOLD_SECS};
pub use heuristic::HeuristicAI;
pub use random::RandomAI;
pub use scoring::{
    evaluate_move, score_move, score_moves, score_position, MoveScore, ScoredMove, Value,
    INFINITY, NEG_INFINITY,
};

use std::fmt;
use std::time::Duration;

use log::{debug, info};

use crate::board::Board;
use crate::error::SearchError;
use crate::position::Position;
use crate::types::Move;

/// 深度为该值时使用单层启发式
pub const HEURISTIC_DEPTH: i64 = -1;

/// 可用策略名称
pub const AVAILABLE_STRATEGIES: &[&str] = &[
    "compressor",
    "random",
    "heuristic",
    "alphabeta",
    "first",
    "alphabetical",
    "combo",
];

/// 默认策略
pub const DEFAULT_STRATEGY: &str = "compressor";

/// 策略说明（CLI 帮助用）
pub fn strategies_help() -> String {
    format!(
        "Available: {} (default: {}); aliases: greedy = heuristic, minimax = alphabeta",
        AVAILABLE_STRATEGIES.join(", "),
        DEFAULT_STRATEGY
    )
}

/// 搜索模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// 均匀随机
    Random,
    /// 单层启发式：分数最高的走法
    Heuristic,
    /// 固定深度 Alpha-Beta
    AlphaBeta(u32),
    /// UCI 字符串最小的走法
    FirstMove,
    /// SAN 字符串最小的走法
    Alphabetical,
    /// 时间充裕时随机，否则同 FirstMove
    Combo,
}

impl SearchMode {
    /// 由深度配置得到模式：-1 为启发式，非负为 Alpha-Beta
    pub fn from_depth(depth: i64) -> Result<Self, SearchError> {
        match depth {
            HEURISTIC_DEPTH => Ok(SearchMode::Heuristic),
            d if d >= 0 => u32::try_from(d)
                .map(SearchMode::AlphaBeta)
                .map_err(|_| SearchError::InvalidSearchDepth(d)),
            d => Err(SearchError::InvalidSearchDepth(d)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Random => write!(f, "random"),
            SearchMode::Heuristic => write!(f, "heuristic"),
            SearchMode::AlphaBeta(depth) => write!(f, "alphabeta(depth={})", depth),
            SearchMode::FirstMove => write!(f, "first"),
            SearchMode::Alphabetical => write!(f, "alphabetical"),
            SearchMode::Combo => write!(f, "combo"),
        }
    }
}

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度，-1 表示单层启发式
    pub depth: i64,
    /// 随机模式，优先于深度
    pub random: bool,
    /// 随机种子
    pub seed: Option<u64>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: HEURISTIC_DEPTH,
            random: false,
            seed: None,
        }
    }
}

impl AIConfig {
    /// 配置对应的搜索模式
    pub fn mode(&self) -> Result<SearchMode, SearchError> {
        if self.random {
            Ok(SearchMode::Random)
        } else {
            SearchMode::from_depth(self.depth)
        }
    }
}

/// 棋钟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// 己方剩余时间
    pub remaining: Duration,
    /// 每步加秒
    pub increment: Duration,
}

/// 一次选着请求
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// 对手是否提和
    pub draw_offered: bool,
    /// 是否在对手思考时搜索
    pub ponder: bool,
    /// 每步时间限制（固定深度搜索不使用，组合策略会参考）
    pub time_limit: Option<Duration>,
    /// 棋钟
    pub clock: Option<Clock>,
    /// 限定根节点候选走法（组合策略使用，其中不合法的走法被忽略）
    pub root_moves: Option<Vec<Move>>,
}

/// 选着结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    pub mv: Move,
    /// 原样回传请求中的提和标志
    pub draw_offered: bool,
    /// 原样回传请求中的 ponder 标志
    pub ponder: bool,
    /// 搜索过的节点数（只有 Alpha-Beta 计数）
    pub nodes: u64,
}

/// 排序辅助函数
///
/// 稳定排序：分数相同的走法保持原有顺序
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    mode: SearchMode,
    random: RandomAI,
}

impl AIEngine {
    pub fn new(mode: SearchMode, seed: Option<u64>) -> Self {
        AIEngine {
            mode,
            random: RandomAI::new(seed),
        }
    }

    /// 按配置创建（随机 / 启发式 / Alpha-Beta）
    pub fn from_config(config: &AIConfig) -> Result<Self, SearchError> {
        Ok(Self::new(config.mode()?, config.seed))
    }

    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        Self::new(SearchMode::Random, seed)
    }

    /// 创建单层启发式 AI
    pub fn heuristic() -> Self {
        Self::new(SearchMode::Heuristic, None)
    }

    /// 创建固定深度 Alpha-Beta AI
    pub fn alpha_beta(depth: u32) -> Self {
        Self::new(SearchMode::AlphaBeta(depth), None)
    }

    /// 创建按 UCI 排序取第一个的 AI
    pub fn first_move() -> Self {
        Self::new(SearchMode::FirstMove, None)
    }

    /// 创建按 SAN 排序取第一个的 AI
    pub fn alphabetical() -> Self {
        Self::new(SearchMode::Alphabetical, None)
    }

    /// 创建随机 / FirstMove 组合 AI
    pub fn combo(seed: Option<u64>) -> Self {
        Self::new(SearchMode::Combo, seed)
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, SearchError> {
        match name.to_lowercase().as_str() {
            "compressor" => Self::from_config(config),
            "random" => Ok(Self::random(config.seed)),
            "heuristic" | "greedy" => Ok(Self::heuristic()),
            "alphabeta" | "minimax" => {
                let depth = u32::try_from(config.depth)
                    .map_err(|_| SearchError::InvalidSearchDepth(config.depth))?;
                Ok(Self::alpha_beta(depth))
            }
            "first" | "first_move" => Ok(Self::first_move()),
            "alphabetical" => Ok(Self::alphabetical()),
            "combo" => Ok(Self::combo(config.seed)),
            _ => Err(SearchError::UnknownStrategy(name.to_string())),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// 为当前行棋方选一个走法
    ///
    /// 根局面没有合法走法时返回 [`SearchError::NoLegalMoves`]。
    /// 搜索结束后局面恢复原状。
    pub fn search<P: Position>(
        &mut self,
        position: &mut P,
        request: &SearchRequest,
    ) -> Result<PlayResult, SearchError> {
        if !position.has_legal_moves() {
            return Err(SearchError::NoLegalMoves);
        }
        if let Some(limit) = request.time_limit {
            debug!("time limit {:?} does not bound the search", limit);
        }

        let (mv, nodes) = match self.mode {
            SearchMode::Random => (self.random.select_move(position), 0),
            SearchMode::Heuristic => (HeuristicAI.select_best_move(position), 0),
            // 深度 0 的根节点不产生走法，按单层启发式选
            SearchMode::AlphaBeta(0) => (HeuristicAI.select_best_move(position), 0),
            SearchMode::AlphaBeta(depth) => {
                let result = alpha_beta_search(position, depth);
                (result.best_move, result.nodes)
            }
            SearchMode::FirstMove => (FirstMoveAI.select_best_move(position), 0),
            SearchMode::Alphabetical => (AlphabeticalAI.select_best_move(position), 0),
            SearchMode::Combo => {
                let legal = position.legal_moves();
                let candidates: Vec<Move> = match &request.root_moves {
                    Some(root_moves) => root_moves
                        .iter()
                        .filter(|m| legal.contains(m))
                        .copied()
                        .collect(),
                    None => legal,
                };

                // 固定的每步时间优先于棋钟
                let clock = request
                    .time_limit
                    .map(|remaining| Clock {
                        remaining,
                        increment: Duration::ZERO,
                    })
                    .or(request.clock);
                if combo_prefers_random(clock.as_ref()) {
                    (self.random.select_from(&candidates), 0)
                } else {
                    (FirstMoveAI.select_from(candidates), 0)
                }
            }
        };

        let mv = mv.ok_or(SearchError::NoLegalMoves)?;
        info!("{} selected {} ({} moves evaluated)", self.mode, mv, nodes);

        Ok(PlayResult {
            mv,
            draw_offered: request.draw_offered,
            ponder: request.ponder,
            nodes,
        })
    }

    /// 单层启发式排序后的前 n 个走法（与模式无关，用于分析）
    pub fn select_moves<P: Position>(&self, position: &P, n: usize) -> Vec<ScoredMove> {
        HeuristicAI.select_moves(position, n)
    }

    /// 从 FEN 选择走法（返回带评分的走法字符串）
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> Result<Vec<(String, Value)>, SearchError> {
        let board = Board::from_fen(fen)?;
        Ok(self
            .select_moves(&board, n)
            .into_iter()
            .map(|sm| (sm.mv.to_uci(), sm.score))
            .collect())
    }

    /// 从 FEN 搜索
    pub fn search_fen(
        &mut self,
        fen: &str,
        request: &SearchRequest,
    ) -> Result<PlayResult, SearchError> {
        let mut board = Board::from_fen(fen)?;
        self.search(&mut board, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;
    use crate::testing::GameTree;
    use crate::types::Square;

    #[test]
    fn test_from_depth() {
        assert_eq!(SearchMode::from_depth(-1), Ok(SearchMode::Heuristic));
        assert_eq!(SearchMode::from_depth(0), Ok(SearchMode::AlphaBeta(0)));
        assert_eq!(SearchMode::from_depth(3), Ok(SearchMode::AlphaBeta(3)));
        assert_eq!(
            SearchMode::from_depth(-2),
            Err(SearchError::InvalidSearchDepth(-2))
        );
    }

    #[test]
    fn test_config_mode() {
        assert_eq!(AIConfig::default().mode(), Ok(SearchMode::Heuristic));

        let random = AIConfig {
            random: true,
            depth: -5,
            ..Default::default()
        };
        assert_eq!(random.mode(), Ok(SearchMode::Random));

        let bad = AIConfig {
            depth: -7,
            ..Default::default()
        };
        assert_eq!(bad.mode(), Err(SearchError::InvalidSearchDepth(-7)));
        assert!(AIEngine::from_config(&bad).is_err());
    }

    #[test]
    fn test_all_strategies_from_name() {
        let config = AIConfig {
            depth: 2,
            seed: Some(1),
            ..Default::default()
        };
        for name in AVAILABLE_STRATEGIES.iter().chain(["greedy", "minimax"].iter()) {
            let result = AIEngine::from_strategy(name, &config);
            assert!(result.is_ok(), "Failed to create strategy: {}", name);
        }

        assert!(matches!(
            AIEngine::from_strategy("mcts", &config),
            Err(SearchError::UnknownStrategy(_))
        ));
        assert_eq!(
            AIEngine::from_strategy("ALPHABETA", &config).unwrap().mode(),
            SearchMode::AlphaBeta(2)
        );
        assert_eq!(
            AIEngine::from_strategy("compressor", &AIConfig::default())
                .unwrap()
                .mode(),
            SearchMode::Heuristic
        );
        assert!(matches!(
            AIEngine::from_strategy("alphabeta", &AIConfig::default()),
            Err(SearchError::InvalidSearchDepth(-1))
        ));
    }

    #[test]
    fn test_promotion_scenario() {
        let request = SearchRequest::default();
        for mut engine in [AIEngine::heuristic(), AIEngine::alpha_beta(0)] {
            let result = engine
                .search_fen(test_positions::PROMOTION, &request)
                .unwrap();
            assert_eq!(result.mv.to_uci(), "a7a8q");
        }
    }

    #[test]
    fn test_no_legal_moves() {
        let request = SearchRequest::default();
        for fen in [test_positions::CHECKMATED, test_positions::STALEMATED] {
            for mut engine in [
                AIEngine::random(Some(1)),
                AIEngine::heuristic(),
                AIEngine::alpha_beta(2),
                AIEngine::first_move(),
                AIEngine::alphabetical(),
                AIEngine::combo(Some(1)),
            ] {
                assert_eq!(
                    engine.search_fen(fen, &request),
                    Err(SearchError::NoLegalMoves)
                );
            }
        }
    }

    #[test]
    fn test_invalid_fen() {
        let mut engine = AIEngine::heuristic();
        assert!(matches!(
            engine.search_fen("not a fen", &SearchRequest::default()),
            Err(SearchError::InvalidFen(_))
        ));
    }

    #[test]
    fn test_flags_pass_through() {
        let mut engine = AIEngine::heuristic();
        let mut board = Board::default();
        for (draw_offered, ponder) in [(false, false), (true, false), (false, true), (true, true)] {
            let request = SearchRequest {
                draw_offered,
                ponder,
                ..Default::default()
            };
            let result = engine.search(&mut board, &request).unwrap();
            assert_eq!(result.draw_offered, draw_offered);
            assert_eq!(result.ponder, ponder);
        }
    }

    #[test]
    fn test_time_limit_does_not_change_result() {
        let mut board = Board::from_fen(test_positions::MIDDLEGAME).unwrap();
        let mut engine = AIEngine::alpha_beta(2);
        let plain = engine.search(&mut board, &SearchRequest::default()).unwrap();
        let limited = engine
            .search(
                &mut board,
                &SearchRequest {
                    time_limit: Some(Duration::from_millis(1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(plain, limited);
    }

    #[test]
    fn test_search_restores_position() {
        let mut board = Board::from_fen(test_positions::MIDDLEGAME).unwrap();
        let fen = board.to_fen();
        let result = AIEngine::alpha_beta(3)
            .search(&mut board, &SearchRequest::default())
            .unwrap();
        assert!(result.nodes > 0);
        assert_eq!(board.to_fen(), fen);
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_alpha_beta_nodes_reported() {
        let mut tree = GameTree::random(11, 3, 4);
        let result = AIEngine::alpha_beta(3)
            .search(&mut tree, &SearchRequest::default())
            .unwrap();
        assert_eq!(result.nodes, tree.pushes());
    }

    #[test]
    fn test_random_seeded() {
        let request = SearchRequest::default();
        let fen = test_positions::MIDDLEGAME;
        let legal = Board::from_fen(fen).unwrap().legal_moves();
        let mut a = AIEngine::random(Some(42));
        let mut b = AIEngine::random(Some(42));
        for _ in 0..10 {
            let ma = a.search_fen(fen, &request).unwrap();
            let mb = b.search_fen(fen, &request).unwrap();
            assert_eq!(ma.mv, mb.mv);
            assert!(legal.contains(&ma.mv));
            assert_eq!(ma.nodes, 0);
        }
    }

    #[test]
    fn test_first_move_smallest_uci() {
        let result = AIEngine::first_move()
            .search_fen(test_positions::START, &SearchRequest::default())
            .unwrap();
        // 开局所有走法中 UCI 字符串最小的是 a2a3
        assert_eq!(result.mv.to_uci(), "a2a3");
    }

    #[test]
    fn test_combo_uses_clock() {
        let fen = test_positions::START;
        let short = SearchRequest {
            clock: Some(Clock {
                remaining: Duration::from_secs(60),
                increment: Duration::ZERO,
            }),
            ..Default::default()
        };
        let mut engine = AIEngine::combo(Some(3));
        for _ in 0..5 {
            assert_eq!(engine.search_fen(fen, &short).unwrap().mv.to_uci(), "a2a3");
        }

        let long = SearchRequest {
            clock: Some(Clock {
                remaining: Duration::from_secs(3600),
                increment: Duration::ZERO,
            }),
            ..Default::default()
        };
        let picks: std::collections::HashSet<Move> = (0..30)
            .map(|_| engine.search_fen(fen, &long).unwrap().mv)
            .collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn test_combo_respects_root_moves() {
        let root_moves: Vec<Move> = ["e2e4", "d2d4", "b1c3"]
            .iter()
            .map(|s| Move::from_uci(s).unwrap())
            .collect();
        let short = SearchRequest {
            clock: Some(Clock {
                remaining: Duration::from_secs(60),
                increment: Duration::ZERO,
            }),
            root_moves: Some(root_moves.clone()),
            ..Default::default()
        };
        let mut engine = AIEngine::combo(Some(9));
        let result = engine.search_fen(test_positions::START, &short).unwrap();
        // 不限定时会走 a2a3
        assert_eq!(result.mv.to_uci(), "b1c3");

        let long = SearchRequest {
            clock: Some(Clock {
                remaining: Duration::from_secs(3600),
                increment: Duration::ZERO,
            }),
            root_moves: Some(root_moves.clone()),
            ..Default::default()
        };
        for _ in 0..20 {
            let mv = engine.search_fen(test_positions::START, &long).unwrap().mv;
            assert!(root_moves.contains(&mv));
        }
    }

    #[test]
    fn test_combo_illegal_root_moves() {
        let request = SearchRequest {
            root_moves: Some(vec![Move::from_uci("e2e5").unwrap()]),
            ..Default::default()
        };
        assert_eq!(
            AIEngine::combo(Some(1)).search_fen(test_positions::START, &request),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn test_alphabetical_smallest_san() {
        let result = AIEngine::from_strategy("alphabetical", &AIConfig::default())
            .unwrap()
            .search_fen(test_positions::START, &SearchRequest::default())
            .unwrap();
        assert_eq!(result.mv.to_uci(), "b1a3");
    }

    #[test]
    fn test_forced_terminal_reply_at_depth_two() {
        let mut tree = GameTree::new();
        let root = tree.root();
        let first = tree.add_child(root);
        tree.add_child(root);

        let result = AIEngine::alpha_beta(2)
            .search(&mut tree, &SearchRequest::default())
            .unwrap();
        assert_eq!(result.mv, tree.move_to(first));
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mv = |from: u8, to: u8| {
            Move::new(Square::new(from).unwrap(), Square::new(to).unwrap())
        };
        let mut scored = vec![
            ScoredMove { mv: mv(0, 1), score: 5 },
            ScoredMove { mv: mv(2, 3), score: 7 },
            ScoredMove { mv: mv(4, 5), score: 7 },
            ScoredMove { mv: mv(6, 7), score: 1 },
        ];
        // Iterator::max_by_key 在并列时取最后一个
        let naive = scored.iter().max_by_key(|s| s.score).unwrap().mv;
        assert_eq!(naive, mv(4, 5));

        sort_and_truncate(&mut scored, 3);
        let order: Vec<Move> = scored.iter().map(|s| s.mv).collect();
        assert_eq!(order, vec![mv(2, 3), mv(4, 5), mv(0, 1)]);
    }

    #[test]
    fn test_select_moves_fen() {
        let engine = AIEngine::heuristic();
        let moves = engine.select_moves_fen(test_positions::START, 5).unwrap();
        assert_eq!(moves.len(), 5);
        assert!(moves.windows(2).all(|w| w[0].1 > w[1].1));
    }
}
