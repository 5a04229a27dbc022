//! Huffman tree construction.
//!
//! The tree is built with a min-priority queue of nodes keyed by frequency.
//! The two lowest-frequency nodes are merged under a new internal node
//! (first extracted on the left) until one node remains.
//!
//! # Tie-break
//!
//! Queue entries are ordered by `(frequency, sequence)`. Leaves are seeded in
//! ascending symbol order with sequence numbers `0..n`; every internal node
//! receives the next sequence number when it is pushed. Nodes of equal
//! frequency are therefore extracted in insertion order, which makes the tree
//! (and every code derived from it) identical across runs and platforms.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol_label;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the Huffman tree.
///
/// Internal nodes own exactly two children; there is no sharing between
/// subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn frequency(&self) -> u64 {
        match self {
            TreeNode::Leaf { frequency, .. } | TreeNode::Internal { frequency, .. } => *frequency,
        }
    }

    /// Combine two nodes; `left` is the one extracted first.
    fn merge(left: TreeNode, right: TreeNode) -> TreeNode {
        TreeNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A node waiting in the build queue.
#[derive(Debug)]
struct QueuedNode {
    node: TreeNode,
    sequence: usize,
}

// Min-heap on (frequency, sequence)
impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key first
        (other.node.frequency(), other.sequence).cmp(&(self.node.frequency(), self.sequence))
    }
}

/// A Huffman tree covering the whole alphabet of its frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Build a tree from a frequency table.
    ///
    /// An alphabet of one symbol yields a tree that is a single leaf.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if no symbol has a positive count.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue: BinaryHeap<QueuedNode> = frequencies
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, frequency))| QueuedNode {
                node: TreeNode::Leaf { symbol, frequency },
                sequence,
            })
            .collect();
        let mut next_sequence = queue.len();

        while queue.len() > 1 {
            let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
                break;
            };
            queue.push(QueuedNode {
                node: TreeNode::merge(first.node, second.node),
                sequence: next_sequence,
            });
            next_sequence += 1;
        }

        let root = queue
            .pop()
            .ok_or(HuffmanError::EmptyFrequencyTable)?
            .node;

        log::debug!(
            "built huffman tree: {} symbols, {} nodes, root weight {}",
            frequencies.len(),
            next_sequence,
            root.frequency()
        );

        Ok(Self { root })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }

    /// Render the tree as an indented listing, two spaces per level.
    ///
    /// ```text
    /// Internal: 4
    ///   Leaf: b (1)
    ///   Leaf: a (3)
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, "", &mut out);
        out
    }
}

fn render_node(node: &TreeNode, indent: &str, out: &mut String) {
    match node {
        TreeNode::Leaf { symbol, frequency } => {
            out.push_str(&format!("{indent}Leaf: {} ({frequency})\n", symbol_label(*symbol)));
        }
        TreeNode::Internal {
            frequency,
            left,
            right,
        } => {
            out.push_str(&format!("{indent}Internal: {frequency}\n"));
            let child_indent = format!("{indent}  ");
            render_node(left, &child_indent, out);
            render_node(right, &child_indent, out);
        }
    }
}
