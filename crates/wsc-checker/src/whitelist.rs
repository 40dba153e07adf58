//! Call patterns whose closures are never inspected.
//!
//! A rule pairs an optional parent pattern with a function-name pattern.
//! Rules without a parent apply to bare calls (`perform { ... }`); rules
//! with one apply to member calls, matching the dotted chain before the
//! method name (`DispatchQueue.main` in `DispatchQueue.main.async { ... }`).
//! Patterns are unanchored regular expressions.

use regex::Regex;
use wsc_parser::parser::{NodeArena, NodeIndex, NodeKind};

use crate::error::CheckError;

#[derive(Clone, Debug)]
pub struct WhitelistRule {
    parent_pattern: Option<Regex>,
    function_name: Regex,
}

impl WhitelistRule {
    pub fn new(parent_pattern: Option<&str>, function_name: &str) -> Result<Self, CheckError> {
        Ok(WhitelistRule {
            parent_pattern: parent_pattern.map(compile).transpose()?,
            function_name: compile(function_name)?,
        })
    }

    pub fn parent_pattern(&self) -> Option<&str> {
        self.parent_pattern.as_ref().map(Regex::as_str)
    }

    pub fn function_name(&self) -> &str {
        self.function_name.as_str()
    }

    pub fn matches(&self, callee: &CalleeShape<'_>) -> bool {
        match (callee, &self.parent_pattern) {
            (CalleeShape::Identifier(name), None) => self.function_name.is_match(name),
            (CalleeShape::MemberChain(segments), Some(parent_pattern)) => {
                let Some((name, parents)) = segments.split_last() else {
                    return false;
                };
                parent_pattern.is_match(&parents.join("."))
                    && self.function_name.is_match(name)
            }
            _ => false,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, CheckError> {
    Regex::new(pattern).map_err(|source| CheckError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[derive(Clone, Debug, Default)]
pub struct Whitelist {
    rules: Vec<WhitelistRule>,
}

impl Whitelist {
    pub fn new(rules: Vec<WhitelistRule>) -> Self {
        Whitelist { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[WhitelistRule] {
        &self.rules
    }

    /// Whether the call at `call` matches any rule.
    pub fn is_whitelisted(&self, arena: &NodeArena, call: NodeIndex) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let Some(data) = arena.get_call(call) else {
            return false;
        };
        let callee = CalleeShape::of(arena, data.callee);
        self.rules.iter().any(|rule| rule.matches(&callee))
    }
}

/// The called expression, as far as whitelisting cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalleeShape<'a> {
    /// `perform`
    Identifier(&'a str),
    /// `DispatchQueue.global().async` -> `["DispatchQueue", "global", "async"]`
    MemberChain(Vec<&'a str>),
    Other,
}

impl<'a> CalleeShape<'a> {
    pub fn of(arena: &'a NodeArena, callee: NodeIndex) -> Self {
        match arena.kind(callee) {
            Some(NodeKind::Identifier(_)) => CalleeShape::Identifier(arena.text(callee)),
            Some(NodeKind::MemberAccess(_)) => {
                CalleeShape::MemberChain(member_chain(arena, callee))
            }
            _ => CalleeShape::Other,
        }
    }
}

/// Segments of a member access chain, outermost first.
///
/// Calls in the middle of the chain contribute their callee's segments;
/// any other base contributes its source text as one segment.
fn member_chain(arena: &NodeArena, access: NodeIndex) -> Vec<&str> {
    let mut reversed = Vec::new();
    let mut current = access;
    loop {
        let Some(NodeKind::MemberAccess(data)) = arena.kind(current) else {
            break;
        };
        reversed.push(arena.text(data.name));
        let mut base = data.base;
        if let Some(call) = arena.get_call(base) {
            if matches!(arena.kind(call.callee), Some(NodeKind::MemberAccess(_))) {
                base = call.callee;
            }
        }
        match arena.kind(base) {
            None => break,
            Some(NodeKind::MemberAccess(_)) => current = base,
            Some(_) => {
                reversed.push(arena.text(base).trim());
                break;
            }
        }
    }
    reversed.reverse();
    reversed
}
