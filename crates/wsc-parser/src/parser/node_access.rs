//! NodeArena access methods.
//!
//! Typed accessors return `None` when the index is `NONE` or the node is of
//! a different kind, so callers can chain them with `?`.

use smallvec::SmallVec;
use wsc_scanner::{SyntaxKind, is_self_name};

use super::base::NodeIndex;
use super::node::*;

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<&NodeKind> {
        self.get(index).map(|node| &node.kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Full source text of the file.
    pub fn source_text(&self) -> &str {
        &self.text
    }

    /// Source text covered by a node.
    pub fn text(&self, index: NodeIndex) -> &str {
        self.get(index)
            .and_then(|node| self.text.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }

    /// Start offset of a node.
    pub fn pos(&self, index: NodeIndex) -> Option<u32> {
        self.get(index).map(|node| node.pos)
    }

    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
        self.kind(index)
            .map(NodeKind::children)
            .unwrap_or_default()
    }

    /// Parent chain from the node's parent up to the root.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent(index)), |&current| {
            Some(self.parent(current))
        })
        .take_while(|index| index.is_some())
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentifierData> {
        match self.kind(index)? {
            NodeKind::Identifier(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_type_decl(&self, index: NodeIndex) -> Option<&TypeDeclData> {
        match self.kind(index)? {
            NodeKind::TypeDecl(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionDeclData> {
        match self.kind(index)? {
            NodeKind::FunctionDecl(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_parameter(&self, index: NodeIndex) -> Option<&ParameterData> {
        match self.kind(index)? {
            NodeKind::Parameter(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallData> {
        match self.kind(index)? {
            NodeKind::Call(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_argument(&self, index: NodeIndex) -> Option<&ArgumentData> {
        match self.kind(index)? {
            NodeKind::Argument(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_member_access(&self, index: NodeIndex) -> Option<&MemberAccessData> {
        match self.kind(index)? {
            NodeKind::MemberAccess(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_closure(&self, index: NodeIndex) -> Option<&ClosureData> {
        match self.kind(index)? {
            NodeKind::Closure(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_capture_item(&self, index: NodeIndex) -> Option<&CaptureItemData> {
        match self.kind(index)? {
            NodeKind::CaptureItem(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_type_ref(&self, index: NodeIndex) -> Option<&TypeRefData> {
        match self.kind(index)? {
            NodeKind::TypeRef(data) => Some(data),
            _ => None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the node is the `self` keyword, plain or back-ticked.
    pub fn is_self_reference(&self, index: NodeIndex) -> bool {
        match self.get_identifier(index) {
            Some(data) if data.token == SyntaxKind::SelfKeyword => true,
            Some(_) => is_self_name(self.text(index)),
            None => false,
        }
    }

    /// Strip postfix `!` / `?` wrappers (`self!`, `self?`).
    pub fn skip_unwraps(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(NodeKind::Postfix(data)) = self.kind(index) {
            if !matches!(
                data.operator,
                SyntaxKind::ExclamationToken | SyntaxKind::QuestionToken
            ) {
                break;
            }
            index = data.operand;
        }
        index
    }

    /// First function declaration in source order below `root`.
    pub fn first_function(&self, root: NodeIndex) -> Option<NodeIndex> {
        super::visit::fold(self, root, None, |found, index, node| {
            if matches!(node.kind, NodeKind::FunctionDecl(_)) {
                *found = Some(index);
                super::visit::VisitControl::Stop
            } else {
                super::visit::VisitControl::Descend
            }
        })
    }
}
