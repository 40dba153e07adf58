//! NodeArena creation methods.
//!
//! Children are always created before their parent; adding a node links
//! every child back to it.

use std::sync::Arc;
use wsc_common::limits::{MAX_NODE_PREALLOC, SOURCE_BYTES_PER_NODE};

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeKind};

impl NodeArena {
    pub fn new(text: Arc<str>) -> NodeArena {
        NodeArena {
            nodes: Vec::new(),
            text,
        }
    }

    /// Create an arena pre-sized from the source length.
    pub fn with_capacity_for(text: Arc<str>) -> NodeArena {
        let capacity = (text.len() / SOURCE_BYTES_PER_NODE).min(MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            text,
        }
    }

    /// Append a node and set the parent link of its children.
    pub fn add(&mut self, kind: NodeKind, pos: u32, end: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for child in kind.children() {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        self.nodes.push(Node {
            kind,
            pos,
            end: end.max(pos),
            parent: NodeIndex::NONE,
        });
        index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop nodes created after `len` (used when a speculative parse is
    /// abandoned). Speculative parses never adopt nodes created before they
    /// started, so no surviving node has a parent past `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}
