//! Xiangqi engine CLI
//!
//! 命令行界面，用于查询规则和测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信（每行一个 JSON）

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;
use xiangqi_engine::{
    get_node_count, parse_fen, reset_node_count, AIConfig, AIEngine, Color, EvalConfig, Evaluator,
    FenState, Game, GameStatus,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi rules engine and minimax AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 评估开关
#[derive(Args, Clone, Copy)]
struct EvalArgs {
    /// 关闭机动性评估
    #[arg(long)]
    no_mobility: bool,

    /// 关闭中心控制评估
    #[arg(long)]
    no_center: bool,
}

impl EvalArgs {
    fn config(&self) -> EvalConfig {
        EvalConfig {
            use_mobility: !self.no_mobility,
            use_center_control: !self.no_center,
        }
    }
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

        /// AI 策略 (minimax, random)
        #[arg(long, default_value = "minimax")]
        strategy: String,

        /// 搜索深度
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 关闭 Alpha-Beta 剪枝（完整 minimax）
        #[arg(long)]
        no_alpha_beta: bool,

        #[command(flatten)]
        eval: EvalArgs,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        #[command(flatten)]
        eval: EvalArgs,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 查询将军、将死、困毙状态
    Status {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// AI 自对弈
    Play {
        /// 起始局面 FEN，默认为标准开局
        #[arg(long, conflicts_with = "endgame")]
        fen: Option<String>,

        /// 经典残局 (seven-stars, earthworm-dragon, fire-burning-camp)
        #[arg(long)]
        endgame: Option<String>,

        /// 红方策略
        #[arg(long, default_value = "minimax")]
        red: String,

        /// 黑方策略
        #[arg(long, default_value = "minimax")]
        black: String,

        /// 搜索深度
        #[arg(long, default_value = "2")]
        depth: u32,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 最多走多少步
        #[arg(long, default_value = "200")]
        max_moves: u32,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: i32,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct StatusInfo {
    turn: String,
    in_check: bool,
    checkmate: bool,
    stalemate: bool,
    flying_general: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ScoreResponse {
    fen: String,
    color: String,
    score: i32,
}

fn score_response(fen: &str, color: Color, score: i32) -> ScoreResponse {
    ScoreResponse {
        fen: fen.to_string(),
        color: color_to_str(color).to_string(),
        score,
    }
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
    n: Option<usize>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    // status 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StatusInfo>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveResult>, depth: u32, nodes: u64, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            depth: Some(depth),
            nodes: Some(nodes),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(eval_score: i32, color: Color) -> Self {
        Self {
            ok: true,
            eval: Some(eval_score),
            color: Some(color_to_str(color).to_string()),
            ..Default::default()
        }
    }

    fn success_status(status: StatusInfo) -> Self {
        Self {
            ok: true,
            status: Some(status),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn color_to_str(color: Color) -> &'static str {
    if color == Color::Red {
        "red"
    } else {
        "black"
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"serialize: {}\"}}", e))
}

fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

fn status_info(state: &FenState) -> StatusInfo {
    let game = Game::from_board(state.board.clone(), state.turn);
    let (checkmate, stalemate, winner) = match game.status() {
        GameStatus::Over { winner, reason } => (
            matches!(reason, xiangqi_engine::WinReason::Checkmate),
            matches!(reason, xiangqi_engine::WinReason::Stalemate),
            Some(color_to_str(winner).to_string()),
        ),
        GameStatus::Ongoing => (false, false, None),
    };
    StatusInfo {
        turn: color_to_str(state.turn).to_string(),
        in_check: state.board.is_in_check(state.turn),
        checkmate,
        stalemate,
        flying_general: state.board.is_flying_general(),
        winner,
    }
}

fn legal_move_strings(state: &FenState) -> Vec<String> {
    state
        .board
        .legal_moves(state.turn)
        .iter()
        .map(|mv| mv.to_iccs())
        .collect()
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => {
            let state = parse_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let moves = legal_move_strings(&state);
            println!("Legal moves ({}):", moves.len());
            for mv in &moves {
                println!("  {}", mv);
            }
        }

        Commands::Best {
            fen,
            strategy,
            depth,
            n,
            seed,
            no_alpha_beta,
            eval,
            json,
        } => {
            let config = AIConfig {
                depth,
                seed,
                alpha_beta: !no_alpha_beta,
                eval: eval.config(),
            };
            let ai = AIEngine::from_strategy(&strategy, &config).unwrap_or_else(|e| exit_with(e));

            reset_node_count();
            let start = Instant::now();
            let moves = ai.select_moves_fen(&fen, n).unwrap_or_else(|e| exit_with(e));
            let elapsed = start.elapsed().as_secs_f64();
            let nodes = get_node_count();

            if json {
                let response = MovesResponse {
                    total: moves.len(),
                    moves: moves
                        .into_iter()
                        .map(|(mv, score)| MoveResult { mv, score })
                        .collect(),
                };
                println!("{}", to_json(&response, true));
                eprintln!("Stats: depth={}, nodes={}, time={:.3}s", depth, nodes, elapsed);
            } else if moves.is_empty() {
                println!("No legal move: resign");
            } else {
                println!("Best moves (strategy={}):", strategy);
                for (mv, score) in moves {
                    println!("  {} (score: {})", mv, score);
                }
                println!(
                    "\nStats: depth={}, nodes={}, time={:.3}s",
                    depth, nodes, elapsed
                );
            }
        }

        Commands::Score { fen, eval, json } => {
            let state = parse_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let score = Evaluator::new(eval.config()).evaluate(&state.board, state.turn);

            if json {
                println!("{}", to_json(&score_response(&fen, state.turn, score), false));
            } else {
                let color_cn = if state.turn == Color::Red {
                    "红方"
                } else {
                    "黑方"
                };
                println!("局面评估 ({} 视角): {}", color_cn, score);
            }
        }

        Commands::Status { fen, json } => {
            let state = parse_fen(&fen).unwrap_or_else(|e| exit_with(e));
            let info = status_info(&state);
            if json {
                println!("{}", to_json(&info, true));
            } else {
                println!("{}", state.board.to_ascii());
                println!("Turn: {}", info.turn);
                println!("In check: {}", info.in_check);
                println!("Checkmate: {}", info.checkmate);
                println!("Stalemate: {}", info.stalemate);
                println!("Flying general: {}", info.flying_general);
                if let Some(winner) = info.winner {
                    println!("Winner: {}", winner);
                }
            }
        }

        Commands::Play {
            fen,
            endgame,
            red,
            black,
            depth,
            seed,
            max_moves,
        } => run_self_play(fen, endgame, &red, &black, depth, seed, max_moves),

        Commands::Server => {
            run_server();
        }
    }
}

/// AI 自对弈
fn run_self_play(
    fen: Option<String>,
    endgame: Option<String>,
    red: &str,
    black: &str,
    depth: u32,
    seed: Option<u64>,
    max_moves: u32,
) {
    let mut game = match (fen, endgame) {
        (Some(fen), _) => Game::from_fen(&fen).unwrap_or_else(|e| exit_with(e)),
        (None, Some(name)) => {
            let endgame = xiangqi_engine::Endgame::from_name(&name)
                .unwrap_or_else(|| exit_with(format!("unknown endgame: {}", name)));
            println!(
                "{} (难度 {}/5)",
                endgame.description(),
                endgame.difficulty()
            );
            Game::from_endgame(endgame).unwrap_or_else(|e| exit_with(e))
        }
        (None, None) => Game::new(),
    };

    let config = AIConfig {
        depth,
        seed,
        ..Default::default()
    };
    let red_ai = AIEngine::from_strategy(red, &config).unwrap_or_else(|e| exit_with(e));
    let black_ai = AIEngine::from_strategy(black, &config).unwrap_or_else(|e| exit_with(e));

    println!("{}", game.board().to_ascii());
    for _ in 0..max_moves {
        if game.is_over() {
            break;
        }
        let side = game.turn();
        let engine = if side == Color::Red { &red_ai } else { &black_ai };
        match game.play_ai(engine) {
            Ok(Some(mv)) => {
                let check = if game.is_check() { " +" } else { "" };
                println!("{:>3}. {:<5} {}{}", game.round() - 1, side, mv, check);
            }
            Ok(None) => println!("{} resigns", side),
            Err(e) => exit_with(e),
        }
    }

    println!("\n{}", game.board().to_ascii());
    println!("FEN: {}", game.to_fen());
    match game.status() {
        GameStatus::Over { winner, reason } => println!("Result: {} wins ({:?})", winner, reason),
        GameStatus::Ongoing => println!("Result: unfinished after {} moves", max_moves),
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

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response, false));
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "eval" => handle_eval_request(&request),
            "status" => handle_status_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let strategy = request.strategy.as_deref().unwrap_or("minimax");
    let n = request.n.unwrap_or(5);
    let config = AIConfig {
        depth: request.depth.unwrap_or(3),
        seed: request.seed,
        ..Default::default()
    };

    let ai = match AIEngine::from_strategy(strategy, &config) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&format!("Invalid strategy: {}", e)),
    };

    reset_node_count();
    let start = Instant::now();

    match ai.select_moves_fen(&request.fen, n) {
        Ok(moves) => {
            let elapsed = start.elapsed().as_secs_f64();
            let move_results: Vec<MoveResult> = moves
                .into_iter()
                .map(|(mv, score)| MoveResult { mv, score })
                .collect();
            ServerResponse::success_moves(
                move_results,
                config.depth,
                get_node_count(),
                elapsed * 1000.0,
            )
        }
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => ServerResponse::success_legal_moves(legal_move_strings(&state)),
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => {
            let score = Evaluator::default().evaluate(&state.board, state.turn);
            ServerResponse::success_eval(score, state.turn)
        }
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 status 命令
fn handle_status_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => ServerResponse::success_status(status_info(&state)),
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiangqi_engine::positions::{MATED_1, STALEMATE_1};
    use xiangqi_engine::INITIAL_FEN;

    fn request(json: &str) -> ServerRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_score_json_is_valid() {
        let fen = "4k4/9/9/9/9/9/9/9/9/4K4 r\u{1b}\"";
        let json = to_json(&score_response(fen, Color::Black, -12), false);
        let parsed: ScoreResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, score_response(fen, Color::Black, -12));
        assert_eq!(parsed.color, "black");
    }

    #[test]
    fn test_moves_request() {
        let json = format!(r#"{{"cmd": "moves", "fen": "{}"}}"#, INITIAL_FEN);
        let response = handle_moves_request(&request(&json));
        assert!(response.ok);
        assert_eq!(response.legal_moves.map(|m| m.len()), Some(44));
    }

    #[test]
    fn test_best_request() {
        let json = format!(
            r#"{{"cmd": "best", "fen": "{}", "depth": 1, "n": 3}}"#,
            INITIAL_FEN
        );
        let response = handle_best_request(&request(&json));
        assert!(response.ok);
        assert_eq!(response.moves.map(|m| m.len()), Some(3));
        assert_eq!(response.depth, Some(1));
    }

    #[test]
    fn test_bad_requests() {
        let response = handle_eval_request(&request(r#"{"cmd": "eval", "fen": "bad"}"#));
        assert!(!response.ok);
        assert!(response.error.is_some());

        let json = format!(
            r#"{{"cmd": "best", "fen": "{}", "strategy": "nope"}}"#,
            INITIAL_FEN
        );
        assert!(!handle_best_request(&request(&json)).ok);
    }

    #[test]
    fn test_status_info() {
        let mated = status_info(&parse_fen(MATED_1).unwrap());
        assert!(mated.in_check);
        assert!(mated.checkmate);
        assert_eq!(mated.winner.as_deref(), Some("red"));

        let stalemate = status_info(&parse_fen(STALEMATE_1).unwrap());
        assert!(!stalemate.in_check);
        assert!(stalemate.stalemate);

        let start = status_info(&parse_fen(INITIAL_FEN).unwrap());
        assert_eq!(
            start,
            StatusInfo {
                turn: "red".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_response_skips_empty_fields() {
        let json = to_json(&ServerResponse::error("boom"), false);
        assert_eq!(json, r#"{"ok":false,"error":"boom"}"#);
    }
}
