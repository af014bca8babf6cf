//! 合成博弈树
//!
//! 实现 [`Position`] 的小型博弈树，用于对比剪枝搜索与穷举 minimax、
//! 构造无合法走法的节点、统计 push 次数。
//!
//! 树上每个格子都视为一枚马，没有兵、没有吃子，走法分数只由位置表和起止格决定。

use rand::prelude::*;

use crate::position::Position;
use crate::types::{Color, Move, PieceType, Square, SquareSet};

#[derive(Debug, Clone)]
struct TreeNode {
    turn: Color,
    edges: Vec<(Move, usize)>,
}

/// 合成博弈树局面
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    current: usize,
    /// push 路径：(父节点, 走法)
    path: Vec<(usize, Move)>,
    pushes: u64,
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTree {
    /// 只有根节点（白方走）的树
    pub fn new() -> Self {
        GameTree {
            nodes: vec![TreeNode {
                turn: Color::White,
                edges: Vec::new(),
            }],
            current: 0,
            path: Vec::new(),
            pushes: 0,
        }
    }

    /// 随机树：`depth` 层，每个节点 0..=max_branching 个子节点（根节点至少 1 个）
    pub fn random(seed: u64, depth: u32, max_branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = GameTree::new();
        let mut frontier = vec![tree.root()];

        for level in 0..depth {
            let mut next = Vec::new();
            for parent in frontier {
                let min = if level == 0 { 1 } else { 0 };
                let count = rng.gen_range(min..=max_branching.max(min));
                for _ in 0..count {
                    let mv = tree.random_move(&mut rng, parent);
                    next.push(tree.add_child_with_move(parent, mv));
                }
            }
            frontier = next;
        }

        tree
    }

    #[inline]
    pub fn root(&self) -> usize {
        0
    }

    /// 添加子节点，走法按子节点序号自动生成
    pub fn add_child(&mut self, parent: usize) -> usize {
        let k = self.nodes[parent].edges.len() as u8;
        let from = Square::new(k % 64).unwrap_or(Square::A1);
        let to = Square::new(63 - (k % 63)).unwrap_or(Square::H8);
        self.add_child_with_move(parent, Move::new(from, to))
    }

    /// 添加子节点并指定走法（同一节点下走法必须不同）
    pub fn add_child_with_move(&mut self, parent: usize, mv: Move) -> usize {
        assert!(
            self.nodes[parent].edges.iter().all(|(m, _)| *m != mv),
            "duplicate move {} under node {}",
            mv,
            parent
        );
        let child = self.nodes.len();
        let turn = self.nodes[parent].turn.opposite();
        self.nodes.push(TreeNode {
            turn,
            edges: Vec::new(),
        });
        self.nodes[parent].edges.push((mv, child));
        child
    }

    /// 通向某个子节点的走法
    pub fn move_to(&self, child: usize) -> Move {
        self.nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .find(|(_, c)| *c == child)
            .map(|(m, _)| *m)
            .unwrap_or_else(|| panic!("node {} has no parent edge", child))
    }

    /// 直接跳到某个节点（清空 push 路径）
    pub fn set_current(&mut self, node: usize) {
        self.current = node;
        self.path.clear();
    }

    /// 累计 push 次数
    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    /// 尚未 pop 的 push 数
    pub fn ply(&self) -> usize {
        self.path.len()
    }

    /// 从当前节点出发、`depth` 层以内的边数（即不剪枝搜索的 push 数）
    pub fn edges_within(&self, depth: u32) -> usize {
        fn count(tree: &GameTree, node: usize, depth: u32) -> usize {
            if depth == 0 {
                return 0;
            }
            tree.nodes[node]
                .edges
                .iter()
                .map(|(_, child)| 1 + count(tree, *child, depth - 1))
                .sum()
        }
        count(self, self.current, depth)
    }

    fn random_move(&self, rng: &mut StdRng, parent: usize) -> Move {
        loop {
            let from = Square::new(rng.gen_range(0..64)).unwrap_or(Square::A1);
            let to = Square::new(rng.gen_range(0..64)).unwrap_or(Square::H8);
            let mv = Move::new(from, to);
            if from != to && self.nodes[parent].edges.iter().all(|(m, _)| *m != mv) {
                return mv;
            }
        }
    }
}

impl Position for GameTree {
    fn legal_moves(&self) -> Vec<Move> {
        self.nodes[self.current]
            .edges
            .iter()
            .map(|(m, _)| *m)
            .collect()
    }

    fn turn(&self) -> Color {
        self.nodes[self.current].turn
    }

    fn push(&mut self, mv: Move) {
        let child = self.nodes[self.current]
            .edges
            .iter()
            .find(|(m, _)| *m == mv)
            .map(|(_, c)| *c)
            .unwrap_or_else(|| panic!("move {} not available at node {}", mv, self.current));
        self.path.push((self.current, mv));
        self.current = child;
        self.pushes += 1;
    }

    fn pop(&mut self) -> Option<Move> {
        let (parent, mv) = self.path.pop()?;
        self.current = parent;
        Some(mv)
    }

    fn piece_type_at(&self, _square: Square) -> Option<PieceType> {
        Some(PieceType::Knight)
    }

    fn pieces(&self, _piece: PieceType, _color: Color) -> SquareSet {
        SquareSet::EMPTY
    }

    fn attackers(&self, _color: Color, _square: Square) -> SquareSet {
        SquareSet::EMPTY
    }

    fn is_capture(&self, _mv: &Move) -> bool {
        false
    }
}
