//! Huffman code tree construction.
//!
//! Nodes live in an arena and refer to their children by index. The tree is
//! built by the greedy two-lowest-weight merge over a binary heap.
//!
//! ## Tie-breaking
//!
//! Candidates are ordered by `(weight, sequence)`. Leaves take sequence numbers
//! in ascending symbol order and every merged node takes the next number, which
//! is also its arena index. The same frequency table therefore always yields
//! the same tree, on the encoder and on the decoder.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use huffpack_core::{Error, Result};
use tracing::trace;

use crate::frequency::FrequencyTable;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Leaf or internal node payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node carrying a symbol.
    Leaf(u8),
    /// Branch with left (`0`) and right (`1`) children.
    Internal { left: NodeId, right: NodeId },
}

/// Arena node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Symbol frequency for leaves, sum of descendant leaves otherwise.
    pub weight: u64,
    pub kind: NodeKind,
}

/// Binary prefix-code tree.
#[derive(Debug, Clone)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Heap entry. `BinaryHeap` is a max-heap, so the ordering is reversed to pop
/// the lowest `(weight, sequence)` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MergeCandidate {
    weight: u64,
    sequence: usize,
}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CodeTree {
    /// Build the tree for `freq`.
    ///
    /// Fails with [`Error::EmptyInput`] when the table has no symbols. A table
    /// with one symbol yields a single-leaf tree.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        if freq.is_empty() {
            return Err(Error::EmptyInput);
        }

        let leaves = freq.distinct();
        let mut nodes = Vec::with_capacity(2 * leaves - 1);
        let mut heap = BinaryHeap::with_capacity(leaves);

        for (symbol, count) in freq.iter() {
            heap.push(MergeCandidate {
                weight: count,
                sequence: nodes.len(),
            });
            nodes.push(Node {
                weight: count,
                kind: NodeKind::Leaf(symbol),
            });
        }

        // The table guarantees the total fits in u64, so sums cannot overflow.
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let merged = Node {
                weight: left.weight + right.weight,
                kind: NodeKind::Internal {
                    left: left.sequence,
                    right: right.sequence,
                },
            };
            heap.push(MergeCandidate {
                weight: merged.weight,
                sequence: nodes.len(),
            });
            nodes.push(merged);
        }

        let root = nodes.len() - 1;
        trace!(
            leaves,
            nodes = nodes.len(),
            root_weight = nodes[root].weight,
            "built code tree"
        );

        Ok(Self { nodes, root })
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total node count (leaves plus internal nodes).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a built tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf(_)))
            .count()
    }

    /// True when the root is itself a leaf.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root].kind, NodeKind::Leaf(_))
    }
}
