//! Parser module: node arena, traversal and the recursive-descent parser.

pub mod base;
pub mod node;
mod node_access;
mod node_arena;
mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;
mod state_types;
pub mod visit;

pub use base::NodeIndex;
pub use node::*;
pub use state::{ParseDiagnostic, ParserState};
pub use visit::{VisitControl, fold};
