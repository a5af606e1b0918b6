//! Registo opcional da árvore de busca, para visualização.

use crate::core::{Color, Move};
use std::fmt::Write;

/// Recebe os nós explorados. Nunca altera o resultado da busca.
pub trait TreeRecorder {
    /// Chamado no início de cada iteração do aprofundamento iterativo.
    fn begin_iteration(&mut self, _depth: u32) {}
    fn enter(&mut self, depth: i32, mv: &Move, color: Color);
    fn leave(&mut self, value: i32);
}

/// Implementação vazia; equivalente a não registar nada.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl TreeRecorder for NoopRecorder {
    #[inline]
    fn enter(&mut self, _depth: i32, _mv: &Move, _color: Color) {}

    #[inline]
    fn leave(&mut self, _value: i32) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub mv: Move,
    pub color: Color,
    pub depth: i32,
    pub value: i32,
    pub children: Vec<TreeNode>,
}

/// Guarda em memória a árvore da última iteração, até `ply_limit` meios-lances.
#[derive(Debug, Clone)]
pub struct TreeCollector {
    ply_limit: usize,
    ply: usize,
    iteration: u32,
    roots: Vec<TreeNode>,
    stack: Vec<TreeNode>,
}

impl TreeCollector {
    pub fn new(ply_limit: usize) -> Self {
        TreeCollector { ply_limit, ply: 0, iteration: 0, roots: Vec::new(), stack: Vec::new() }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn node_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Desenha a árvore com um nó por linha, indentado por meio-lance.
    pub fn render(&self) -> String {
        fn walk(out: &mut String, nodes: &[TreeNode], indent: usize) {
            for node in nodes {
                let _ = writeln!(
                    out,
                    "{:indent$}{} {:?} d={} v={}",
                    "",
                    node.mv,
                    node.color,
                    node.depth,
                    node.value,
                    indent = indent * 2
                );
                walk(out, &node.children, indent + 1);
            }
        }

        let mut out = String::new();
        walk(&mut out, &self.roots, 0);
        out
    }
}

impl TreeRecorder for TreeCollector {
    fn begin_iteration(&mut self, depth: u32) {
        self.iteration = depth;
        self.roots.clear();
        self.stack.clear();
        self.ply = 0;
    }

    fn enter(&mut self, depth: i32, mv: &Move, color: Color) {
        self.ply += 1;
        if self.ply <= self.ply_limit {
            self.stack.push(TreeNode { mv: *mv, color, depth, value: 0, children: Vec::new() });
        }
    }

    fn leave(&mut self, value: i32) {
        if self.ply <= self.ply_limit {
            if let Some(mut node) = self.stack.pop() {
                node.value = value;
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => self.roots.push(node),
                }
            }
        }
        self.ply = self.ply.saturating_sub(1);
    }
}
