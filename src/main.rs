//! PSQT AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use psqt_ai::{
    apply_move_to_fen, get_legal_moves_from_fen, score_position, strategies_help, AIConfig,
    AIEngine, Board, Clock, Color, GameStatus, Move, PlayResult, Position, SearchError,
    SearchRequest, Value, DEFAULT_STRATEGY, NEG_INFINITY,
};

#[derive(Parser)]
#[command(name = "psqt-ai")]
#[command(about = "Piece-square-table chess move selector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        #[arg(long, default_value = DEFAULT_STRATEGY, help = strategies_help())]
        strategy: String,

        /// 搜索深度（-1 为单层启发式）
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        depth: i64,

        /// 随机模式（compressor 策略下优先于深度）
        #[arg(long)]
        random: bool,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 额外列出的启发式候选走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 对手提和
        #[arg(long)]
        draw_offered: bool,

        /// ponder 标志
        #[arg(long)]
        ponder: bool,

        /// 时间限制（秒），固定深度搜索会忽略
        #[arg(long, value_parser = parse_secs)]
        time_limit: Option<Duration>,

        /// 己方剩余时间（秒）
        #[arg(long, value_parser = parse_secs)]
        remaining: Option<Duration>,

        /// 每步加秒
        #[arg(long, default_value = "0", value_parser = parse_secs)]
        increment: Duration,

        /// 限定根节点候选走法（逗号分隔的 UCI，combo 策略使用）
        #[arg(long, value_delimiter = ',', value_parser = parse_uci)]
        root_moves: Option<Vec<Move>>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 执行一个走法，输出新 FEN
    Apply {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// UCI 走法
        #[arg(long = "move")]
        mv: String,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: Value,
}

#[derive(Serialize, Deserialize)]
struct BestResponse {
    #[serde(rename = "move")]
    mv: String,
    strategy: String,
    draw_offered: bool,
    ponder: bool,
    nodes: u64,
    elapsed_ms: f64,
    nps: f64,
    candidates: Vec<MoveResult>,
}

#[derive(Serialize, Deserialize)]
struct ScoreResponse {
    fen: String,
    color: String,
    status: String,
    /// 没有合法走法时为 null
    score: Option<Value>,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    depth: Option<i64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default, rename = "move")]
    mv: Option<String>,
    #[serde(default)]
    draw_offered: bool,
    #[serde(default)]
    ponder: bool,
    #[serde(default)]
    time_limit: Option<f64>,
    #[serde(default)]
    remaining: Option<f64>,
    #[serde(default)]
    increment: Option<f64>,
    #[serde(default)]
    random: bool,
    #[serde(default)]
    root_moves: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<BestResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<ScoreResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

/// best 命令的参数
struct BestParams<'a> {
    fen: &'a str,
    strategy: &'a str,
    config: AIConfig,
    n: usize,
    request: SearchRequest,
}

fn color_to_str(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn status_to_str(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "ongoing",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
    }
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

/// 秒数转 Duration，负数、NaN、无穷都拒绝
fn secs(value: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| format!("invalid duration: {} (expected finite, non-negative seconds)", value))
}

fn parse_secs(s: &str) -> Result<Duration, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {}", s))?;
    secs(value)
}

fn parse_uci(s: &str) -> Result<Move, SearchError> {
    Move::from_uci(s.trim()).ok_or_else(|| SearchError::InvalidMove(s.to_string()))
}

fn build_request(
    draw_offered: bool,
    ponder: bool,
    time_limit: Option<Duration>,
    remaining: Option<Duration>,
    increment: Duration,
    root_moves: Option<Vec<Move>>,
) -> SearchRequest {
    SearchRequest {
        draw_offered,
        ponder,
        time_limit,
        clock: remaining.map(|remaining| Clock {
            remaining,
            increment,
        }),
        root_moves,
    }
}

fn run_best(params: &BestParams) -> Result<BestResponse, SearchError> {
    let mut engine = AIEngine::from_strategy(params.strategy, &params.config)?;
    let mut board = Board::from_fen(params.fen)?;

    let start = Instant::now();
    let PlayResult {
        mv,
        draw_offered,
        ponder,
        nodes,
    } = engine.search(&mut board, &params.request)?;
    let elapsed = start.elapsed().as_secs_f64();

    let candidates = engine
        .select_moves(&board, params.n)
        .into_iter()
        .map(|sm| MoveResult {
            mv: sm.mv.to_uci(),
            score: sm.score,
        })
        .collect();

    Ok(BestResponse {
        mv: mv.to_uci(),
        strategy: engine.mode().to_string(),
        draw_offered,
        ponder,
        nodes,
        elapsed_ms: elapsed * 1000.0,
        nps: calc_nps(nodes, elapsed),
        candidates,
    })
}

fn run_score(fen: &str) -> Result<ScoreResponse, SearchError> {
    let board = Board::from_fen(fen)?;
    let score = score_position(&board);
    Ok(ScoreResponse {
        fen: board.to_fen(),
        color: color_to_str(board.turn()).to_string(),
        status: status_to_str(board.game_status()).to_string(),
        score: (score != NEG_INFINITY).then_some(score),
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"serialization failed: {}\"}}", e))
}

fn exit_with_error(e: SearchError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => match get_legal_moves_from_fen(&fen) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => exit_with_error(e),
        },

        Commands::Best {
            fen,
            strategy,
            depth,
            random,
            seed,
            n,
            draw_offered,
            ponder,
            time_limit,
            remaining,
            increment,
            root_moves,
            json,
        } => {
            let params = BestParams {
                fen: &fen,
                strategy: &strategy,
                config: AIConfig {
                    depth,
                    random,
                    seed,
                },
                n,
                request: build_request(
                    draw_offered,
                    ponder,
                    time_limit,
                    remaining,
                    increment,
                    root_moves,
                ),
            };

            match run_best(&params) {
                Ok(response) => {
                    if json {
                        println!("{}", to_json(&response, true));
                    } else {
                        println!("Best move (strategy={}): {}", response.strategy, response.mv);
                        if response.draw_offered || response.ponder {
                            println!(
                                "  draw_offered={}, ponder={}",
                                response.draw_offered, response.ponder
                            );
                        }
                        println!("Candidates:");
                        for candidate in &response.candidates {
                            println!("  {} (score: {})", candidate.mv, candidate.score);
                        }
                    }
                    eprintln!(
                        "Stats: nodes={}, time={:.3}s, nps={:.0}",
                        response.nodes,
                        response.elapsed_ms / 1000.0,
                        response.nps
                    );
                }
                Err(e) => exit_with_error(e),
            }
        }

        Commands::Score { fen, json } => match run_score(&fen) {
            Ok(response) => {
                if json {
                    println!("{}", to_json(&response, true));
                } else {
                    match response.score {
                        Some(score) => println!(
                            "Position score ({} to move): {}",
                            response.color, score
                        ),
                        None => println!(
                            "No legal moves ({} to move, {})",
                            response.color, response.status
                        ),
                    }
                }
            }
            Err(e) => exit_with_error(e),
        },

        Commands::Apply { fen, mv } => match apply_move_to_fen(&fen, &mv) {
            Ok(new_fen) => println!("{}", new_fen),
            Err(e) => exit_with_error(e),
        },

        Commands::Server => {
            run_server();
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response, false));
                let _ = stdout.flush();
                continue;
            }
        };

        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "score" => handle_score_request(&request),
            "apply" => handle_apply_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// server 请求中的时间与候选走法
fn server_search_request(request: &ServerRequest) -> Result<SearchRequest, String> {
    let time_limit = request.time_limit.map(secs).transpose()?;
    let remaining = request.remaining.map(secs).transpose()?;
    let increment = secs(request.increment.unwrap_or(0.0))?;
    let root_moves = request
        .root_moves
        .as_ref()
        .map(|moves| moves.iter().map(|s| parse_uci(s)).collect::<Result<Vec<_>, _>>())
        .transpose()
        .map_err(|e| e.to_string())?;
    Ok(build_request(
        request.draw_offered,
        request.ponder,
        time_limit,
        remaining,
        increment,
        root_moves,
    ))
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let search_request = match server_search_request(request) {
        Ok(r) => r,
        Err(e) => return ServerResponse::error(&e),
    };
    let params = BestParams {
        fen: &request.fen,
        strategy: request.strategy.as_deref().unwrap_or(DEFAULT_STRATEGY),
        config: AIConfig {
            depth: request.depth.unwrap_or(-1),
            random: request.random,
            seed: request.seed,
        },
        n: request.n.unwrap_or(1),
        request: search_request,
    };

    match run_best(&params) {
        Ok(best) => ServerResponse {
            ok: true,
            best: Some(best),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_fen(&request.fen) {
        Ok(moves) => ServerResponse {
            ok: true,
            legal_moves: Some(moves),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 score 命令
fn handle_score_request(request: &ServerRequest) -> ServerResponse {
    match run_score(&request.fen) {
        Ok(score) => ServerResponse {
            ok: true,
            score: Some(score),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 apply 命令
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let Some(mv) = request.mv.as_deref() else {
        return ServerResponse::error("Missing field: move");
    };
    match apply_move_to_fen(&request.fen, mv) {
        Ok(fen) => ServerResponse {
            ok: true,
            fen: Some(fen),
            ..Default::default()
        },
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}
