//! Self usage detection.
//!
//! A closure uses `self` when any member access below it has `self` as its
//! base (`self.x`, `self?.x`, `self!.x`). Nested closures are searched like
//! any other expression.

use wsc_parser::{NodeArena, NodeIndex, NodeKind, VisitControl, fold};

/// Whether any statement in `body` accesses a member of `self`.
pub fn uses_self(arena: &NodeArena, body: &[NodeIndex]) -> bool {
    body.iter()
        .any(|&statement| contains_self_member_access(arena, statement))
}

pub fn contains_self_member_access(arena: &NodeArena, root: NodeIndex) -> bool {
    fold(arena, root, false, |found, _, node| {
        if let NodeKind::MemberAccess(access) = &node.kind {
            if arena.is_self_reference(arena.skip_unwraps(access.base)) {
                *found = true;
                return VisitControl::Stop;
            }
        }
        VisitControl::Descend
    })
}
