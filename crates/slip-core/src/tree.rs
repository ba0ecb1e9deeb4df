//! # Permutation Tree
//!
//! Counts the single bets hidden inside a "complex" multi-position bet.
//!
//! ## Shape
//! ```text
//! bets "123,234,345" (position → alternatives)
//!
//!  level 0        1              2              3
//!               / | \          /   \          /   \
//!  level 1     2  3  4        3     4        2     4
//!             /|\ |\ |\       |\    |\       |\    |
//!  level 2   3 4 5 4 5 3 5    4 5   3 5      4 5   5
//!
//!  A value never repeats along a path; 14 leaves = 14 single bets.
//! ```
//!
//! Nodes live in an arena (`Vec<Node>`); children are indices into it, and
//! duplicate suppression is a lookup by value among a parent's children.
//! Recursion depth never exceeds the number of bet positions.

use std::collections::HashSet;

use crate::tokenizer::Bets;

/// Handle to a node of one [`PermutationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    value: String,
    level: usize,
    children: Vec<NodeId>,
}

/// A forest with one level per bet position.
#[derive(Debug, Clone, Default)]
pub struct PermutationTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl PermutationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the tree level by level from the items of every bet position.
    ///
    /// Position 0's distinct items become roots; each later position's
    /// distinct items are inserted below every root at that level.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::tokenizer::{tokenize, Delimiter};
    /// use slip_core::tree::PermutationTree;
    ///
    /// let bets = tokenize("123,234,345", &Delimiter::comma(), &Delimiter::unsigned(), None);
    /// let tree = PermutationTree::build(&bets, false);
    /// assert_eq!(tree.total(bets.len()), 14);
    /// ```
    pub fn build(bets: &Bets, allow_repeat: bool) -> Self {
        let mut tree = PermutationTree::new();

        for level in 0..bets.len() {
            let values = distinct(bets.items(level));
            if level == 0 {
                for value in values {
                    tree.add_root(value);
                }
                continue;
            }

            for root_index in 0..tree.roots.len() {
                let root = tree.roots[root_index];
                for value in &values {
                    tree.insert(root, level, value, allow_repeat);
                }
            }
        }

        tree
    }

    /// Adds a level-0 node, or returns the existing root with that value.
    pub fn add_root(&mut self, value: &str) -> NodeId {
        if let Some(existing) = self.roots.iter().find(|id| self.nodes[id.0].value == value) {
            return *existing;
        }
        let id = self.push(value, 0);
        self.roots.push(id);
        id
    }

    /// Inserts `value` at depth `level` somewhere below `node`.
    ///
    /// - Without `allow_repeat`, a node whose own value equals `value` stops
    ///   the insertion for its whole subtree, and a parent never receives two
    ///   children with the same value.
    /// - A node at `level - 1` receives the child; any other node forwards
    ///   the insertion to all of its children.
    pub fn insert(&mut self, node: NodeId, level: usize, value: &str, allow_repeat: bool) {
        if !allow_repeat && self.nodes[node.0].value == value {
            return;
        }

        if self.nodes[node.0].level + 1 == level {
            if !allow_repeat && self.child_with_value(node, value).is_some() {
                return;
            }
            let child = self.push(value, level);
            self.nodes[node.0].children.push(child);
        } else {
            // Only deeper nodes change below, so this child list is stable
            for index in 0..self.nodes[node.0].children.len() {
                let child = self.nodes[node.0].children[index];
                self.insert(child, level, value, allow_repeat);
            }
        }
    }

    /// Counts the complete bets below `node` for a slip of `total_levels`
    /// positions.
    ///
    /// Children's counts are summed; a node at level `total_levels - 2` whose
    /// children contribute nothing reports its number of children instead.
    /// Leaves are therefore counted by their parent, and a slip with fewer
    /// than two positions counts 0.
    pub fn count(&self, node: NodeId, total_levels: usize) -> u64 {
        let current = &self.nodes[node.0];
        let sum: u64 = current
            .children
            .iter()
            .map(|child| self.count(*child, total_levels))
            .sum();

        if sum == 0 && current.level + 2 == total_levels {
            current.children.len() as u64
        } else {
            sum
        }
    }

    /// Sum of [`count`](Self::count) over every root.
    pub fn total(&self, total_levels: usize) -> u64 {
        self.roots
            .iter()
            .map(|root| self.count(*root, total_levels))
            .sum()
    }

    /// Every root-to-leaf path, values joined by `separator`.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::tokenizer::{tokenize, Delimiter};
    /// use slip_core::tree::PermutationTree;
    ///
    /// let bets = tokenize("12,12", &Delimiter::comma(), &Delimiter::unsigned(), None);
    /// let tree = PermutationTree::build(&bets, false);
    /// assert_eq!(tree.paths(" "), vec!["1 2", "2 1"]);
    /// ```
    pub fn paths(&self, separator: &str) -> Vec<String> {
        let mut paths = Vec::new();
        for root in &self.roots {
            self.collect_paths(*root, None, separator, &mut paths);
        }
        paths
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn level(&self, node: NodeId) -> usize {
        self.nodes[node.0].level
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, value: &str, level: usize) -> NodeId {
        self.nodes.push(Node {
            value: value.to_string(),
            level,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn child_with_value(&self, node: NodeId, value: &str) -> Option<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].value == value)
    }

    fn collect_paths(
        &self,
        node: NodeId,
        prefix: Option<&str>,
        separator: &str,
        paths: &mut Vec<String>,
    ) {
        let current = &self.nodes[node.0];
        let path = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, separator, current.value),
            None => current.value.clone(),
        };

        if current.children.is_empty() {
            paths.push(path);
            return;
        }
        for child in &current.children {
            self.collect_paths(*child, Some(&path), separator, paths);
        }
    }
}

/// Items in first-seen order without repeats.
fn distinct(items: Vec<&str>) -> Vec<&str> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
