//! 局面能力接口
//!
//! 搜索核心只通过这个 trait 访问棋盘：合法走法、行棋方、push/pop、
//! 格子上的棋子、攻击者集合、是否吃子

use crate::types::{Color, Move, PieceType, Square, SquareSet};

/// 搜索所需的局面接口
///
/// `push`/`pop` 必须严格后进先出：`pop` 撤销最近一次尚未撤销的 `push`
pub trait Position {
    /// 当前行棋方的全部合法走法，顺序必须稳定
    fn legal_moves(&self) -> Vec<Move>;

    /// 当前行棋方
    fn turn(&self) -> Color;

    /// 执行走法
    fn push(&mut self, mv: Move);

    /// 撤销最近一次走法，没有可撤销的走法时返回 None
    fn pop(&mut self) -> Option<Move>;

    /// 某格上的棋子类型
    fn piece_type_at(&self, square: Square) -> Option<PieceType>;

    /// 某方某类棋子所在的格子
    fn pieces(&self, piece: PieceType, color: Color) -> SquareSet;

    /// `color` 方攻击 `square` 的棋子所在格子
    fn attackers(&self, color: Color, square: Square) -> SquareSet;

    /// 走法是否吃子（含吃过路兵）
    fn is_capture(&self, mv: &Move) -> bool;

    /// 走法的 SAN 记法，不支持时为 None
    fn san(&self, _mv: &Move) -> Option<String> {
        None
    }

    #[inline]
    fn has_legal_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }
}

/// 走法作用域：创建时 push，离开作用域（包括剪枝 break）时 pop
pub struct MoveGuard<'a, P: Position> {
    position: &'a mut P,
    mv: Move,
}

impl<'a, P: Position> MoveGuard<'a, P> {
    pub fn new(position: &'a mut P, mv: Move) -> Self {
        position.push(mv);
        MoveGuard { position, mv }
    }

    /// 走完之后的局面
    #[inline]
    pub fn position(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        let popped = self.position.pop();
        debug_assert_eq!(
            popped,
            Some(self.mv),
            "unbalanced make/unmake: pushed {} but popped {:?}",
            self.mv,
            popped
        );
    }
}
