//! FEN 接口
//!
//! 标准国际象棋 FEN：`<棋盘> <行棋方> <易位权> <吃过路兵格> <半回合数> <回合数>`
//!
//! 输出的 FEN 不保留半回合数和回合数（固定为 `0 1`）。

use crate::board::{Board, GameStatus};
use crate::error::SearchError;
use crate::position::Position;
use crate::types::Color;

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<Board, SearchError> {
    Board::from_fen(fen)
}

/// 从 FEN 获取所有合法走法（UCI 格式）
pub fn get_legal_moves_from_fen(fen: &str) -> Result<Vec<String>, SearchError> {
    Ok(parse_fen(fen)?.legal_moves_str())
}

/// 在 FEN 局面上执行一个 UCI 走法，返回新 FEN
pub fn apply_move_to_fen(fen: &str, uci: &str) -> Result<String, SearchError> {
    let mut board = parse_fen(fen)?;
    let mv = board.parse_move(uci)?;
    board.push(mv);
    Ok(board.to_fen())
}

/// FEN 局面的行棋方和状态
pub fn fen_status(fen: &str) -> Result<(Color, GameStatus), SearchError> {
    let board = parse_fen(fen)?;
    Ok((board.turn(), board.game_status()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;

    #[test]
    fn test_legal_moves_from_fen() {
        let moves = get_legal_moves_from_fen(test_positions::START).unwrap();
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&"e2e4".to_string()));
        assert!(moves.contains(&"g1f3".to_string()));

        let mated = get_legal_moves_from_fen(test_positions::CHECKMATED).unwrap();
        assert!(mated.is_empty());
    }

    #[test]
    fn test_apply_move() {
        let fen = apply_move_to_fen(test_positions::START, "e2e4").unwrap();
        let (turn, status) = fen_status(&fen).unwrap();
        assert_eq!(turn, Color::Black);
        assert_eq!(status, GameStatus::Ongoing);
        assert!(fen.starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
    }

    #[test]
    fn test_apply_promotion() {
        let fen = apply_move_to_fen(test_positions::PROMOTION, "a7a8n").unwrap();
        assert!(fen.starts_with("N7/8/"), "{}", fen);
    }

    #[test]
    fn test_apply_mating_move() {
        let fen = apply_move_to_fen(test_positions::MATE_IN_ONE, "d1d8").unwrap();
        assert_eq!(fen_status(&fen).unwrap().1, GameStatus::Checkmate);
    }

    #[test]
    fn test_apply_move_errors() {
        assert!(matches!(
            apply_move_to_fen(test_positions::START, "e2e5"),
            Err(SearchError::IllegalMove(_))
        ));
        assert!(matches!(
            apply_move_to_fen(test_positions::START, "zz"),
            Err(SearchError::InvalidMove(_))
        ));
        assert!(matches!(
            apply_move_to_fen("8/8/8 w", "e2e4"),
            Err(SearchError::InvalidFen(_))
        ));
    }

    #[test]
    fn test_status() {
        assert_eq!(
            fen_status(test_positions::STALEMATED).unwrap().1,
            GameStatus::Stalemate
        );
        assert_eq!(
            fen_status(test_positions::CHECKMATED).unwrap(),
            (Color::White, GameStatus::Checkmate)
        );
    }
}
