//! Generic tree traversal.

use super::base::NodeIndex;
use super::node::{Node, NodeArena};

/// What a `fold` callback wants done with the node it just visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitControl {
    /// Visit the node's children next.
    Descend,
    /// Do not visit the node's children.
    Skip,
    /// End the traversal.
    Stop,
}

/// Pre-order walk from `root` in source order, threading `acc` through
/// `visit`. Uses an explicit stack, so tree depth does not consume call
/// stack.
pub fn fold<A, F>(arena: &NodeArena, root: NodeIndex, mut acc: A, mut visit: F) -> A
where
    F: FnMut(&mut A, NodeIndex, &Node) -> VisitControl,
{
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(node) = arena.get(index) else {
            continue;
        };
        match visit(&mut acc, index, node) {
            VisitControl::Descend => stack.extend(node.kind.children().into_iter().rev()),
            VisitControl::Skip => {}
            VisitControl::Stop => break,
        }
    }
    acc
}
