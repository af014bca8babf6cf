//! 国际象棋棋盘
//!
//! 对 `chess` crate 的薄封装：走法生成交给 `chess::MoveGen`，
//! push/pop 通过保存历史局面实现（`chess::Board` 是 Copy 的小结构）。

use std::str::FromStr;

use chess::{BitBoard, BoardStatus, ChessMove, MoveGen, ALL_SQUARES};
use shakmaty::{fen::Fen, san::SanPlus, uci::UciMove, CastlingMode, Chess};

use crate::error::SearchError;
use crate::position::Position;
use crate::types::{Color, Move, PieceType, Square, SquareSet};

/// 局面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// 棋盘（带走法历史，支持 push/pop）
#[derive(Clone)]
pub struct Board {
    current: chess::Board,
    /// 每次 push 前的局面和对应走法
    history: Vec<(chess::Board, Move)>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            current: chess::Board::default(),
            history: Vec::new(),
        }
    }
}

impl Board {
    /// 从 FEN 字符串创建棋盘
    pub fn from_fen(fen: &str) -> Result<Board, SearchError> {
        let current = chess::Board::from_str(fen.trim())
            .map_err(|e| SearchError::InvalidFen(format!("{}: {:?}", fen, e)))?;
        Ok(Board {
            current,
            history: Vec::new(),
        })
    }

    /// 当前局面的 FEN
    pub fn to_fen(&self) -> String {
        self.current.to_string()
    }

    /// 已执行（尚未撤销）的走法数
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn game_status(&self) -> GameStatus {
        match self.current.status() {
            BoardStatus::Ongoing => GameStatus::Ongoing,
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Stalemate,
        }
    }

    /// 解析并校验 UCI 走法
    pub fn parse_move(&self, uci: &str) -> Result<Move, SearchError> {
        let mv = Move::from_uci(uci).ok_or_else(|| SearchError::InvalidMove(uci.to_string()))?;
        if self.current.legal(to_chess_move(&mv)) {
            Ok(mv)
        } else {
            Err(SearchError::IllegalMove(uci.to_string()))
        }
    }

    /// 获取所有合法走法（字符串格式）
    pub fn legal_moves_str(&self) -> Vec<String> {
        self.legal_moves().iter().map(|m| m.to_uci()).collect()
    }
}

impl Position for Board {
    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.current)
            .map(|cm| from_chess_move(&cm))
            .collect()
    }

    #[inline]
    fn turn(&self) -> Color {
        from_chess_color(self.current.side_to_move())
    }

    fn push(&mut self, mv: Move) {
        let cm = to_chess_move(&mv);
        debug_assert!(self.current.legal(cm), "push of illegal move {}", mv);
        let next = self.current.make_move_new(cm);
        self.history.push((self.current, mv));
        self.current = next;
    }

    fn pop(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.current = previous;
        Some(mv)
    }

    #[inline]
    fn piece_type_at(&self, square: Square) -> Option<PieceType> {
        self.current
            .piece_on(to_chess_square(square))
            .map(from_chess_piece)
    }

    fn pieces(&self, piece: PieceType, color: Color) -> SquareSet {
        let bb = *self.current.pieces(to_chess_piece(piece))
            & *self.current.color_combined(to_chess_color(color));
        SquareSet(bb.0)
    }

    fn attackers(&self, color: Color, square: Square) -> SquareSet {
        let board = &self.current;
        let sq = to_chess_square(square);
        let occupied = *board.combined();
        let queens = *board.pieces(chess::Piece::Queen);

        // 兵的攻击取反向：站在 sq 的对方兵能吃到的格子
        let pawns = chess::get_pawn_attacks(
            sq,
            to_chess_color(color.opposite()),
            *board.pieces(chess::Piece::Pawn),
        );
        let knights = chess::get_knight_moves(sq) & *board.pieces(chess::Piece::Knight);
        let diagonal = chess::get_bishop_moves(sq, occupied)
            & (*board.pieces(chess::Piece::Bishop) | queens);
        let straight =
            chess::get_rook_moves(sq, occupied) & (*board.pieces(chess::Piece::Rook) | queens);
        let kings = chess::get_king_moves(sq) & *board.pieces(chess::Piece::King);

        let all: BitBoard = pawns | knights | diagonal | straight | kings;
        SquareSet((all & *board.color_combined(to_chess_color(color))).0)
    }

    /// SAN（含 `+`/`#` 后缀），由 `shakmaty` 从当前 FEN 重新建局面后生成
    fn san(&self, mv: &Move) -> Option<String> {
        let fen: Fen = self.to_fen().parse().ok()?;
        let pos: Chess = fen.into_position(CastlingMode::Standard).ok()?;
        let uci: UciMove = mv.to_uci().parse().ok()?;
        let m = uci.to_move(&pos).ok()?;
        Some(SanPlus::from_move(pos, &m).to_string())
    }

    fn is_capture(&self, mv: &Move) -> bool {
        if self.piece_type_at(mv.to).is_some() {
            return true;
        }
        // 吃过路兵：兵斜走到空格
        self.piece_type_at(mv.from) == Some(PieceType::Pawn) && mv.from.file() != mv.to.file()
    }
}

#[inline]
fn to_chess_square(square: Square) -> chess::Square {
    ALL_SQUARES[square.index()]
}

#[inline]
fn from_chess_square(square: chess::Square) -> Square {
    // chess::Square 的索引总在 0..64 内
    Square::new(square.to_index() as u8).unwrap_or(Square::A1)
}

fn to_chess_piece(piece: PieceType) -> chess::Piece {
    match piece {
        PieceType::Pawn => chess::Piece::Pawn,
        PieceType::Knight => chess::Piece::Knight,
        PieceType::Bishop => chess::Piece::Bishop,
        PieceType::Rook => chess::Piece::Rook,
        PieceType::Queen => chess::Piece::Queen,
        PieceType::King => chess::Piece::King,
    }
}

fn from_chess_piece(piece: chess::Piece) -> PieceType {
    match piece {
        chess::Piece::Pawn => PieceType::Pawn,
        chess::Piece::Knight => PieceType::Knight,
        chess::Piece::Bishop => PieceType::Bishop,
        chess::Piece::Rook => PieceType::Rook,
        chess::Piece::Queen => PieceType::Queen,
        chess::Piece::King => PieceType::King,
    }
}

fn to_chess_color(color: Color) -> chess::Color {
    match color {
        Color::White => chess::Color::White,
        Color::Black => chess::Color::Black,
    }
}

fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

fn to_chess_move(mv: &Move) -> ChessMove {
    ChessMove::new(
        to_chess_square(mv.from),
        to_chess_square(mv.to),
        mv.promotion.map(to_chess_piece),
    )
}

fn from_chess_move(cm: &ChessMove) -> Move {
    Move {
        from: from_chess_square(cm.get_source()),
        to: from_chess_square(cm.get_dest()),
        promotion: cm.get_promotion().map(from_chess_piece),
    }
}
