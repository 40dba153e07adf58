//! Capture list inspection.

use wsc_parser::NodeArena;
use wsc_parser::NodeIndex;
use wsc_parser::parser::CaptureSpecifier;

/// Whether the capture list holds `weak` or `unowned` `self`.
///
/// The captured expression is what counts, so `[weak owner = self]`
/// qualifies while `[weak self = other]` does not.
pub fn has_weak_or_unowned_self(arena: &NodeArena, captures: &[NodeIndex]) -> bool {
    captures.iter().any(|&capture| {
        let Some(item) = arena.get_capture_item(capture) else {
            return false;
        };
        matches!(
            item.specifier,
            CaptureSpecifier::Weak | CaptureSpecifier::Unowned
        ) && arena.is_self_reference(item.expression)
    })
}
