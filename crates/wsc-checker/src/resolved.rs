//! Three-valued resolution results.

/// Outcome of a question that syntax alone may not settle.
///
/// `Indeterminate` is a distinct answer, not a weaker `DefinitelyNot`:
/// callers that want to suppress a report must match `DefinitelyNot`
/// explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedKind {
    Definitely,
    DefinitelyNot,
    Indeterminate,
}

impl ResolvedKind {
    #[inline]
    pub fn is_definitely_not(self) -> bool {
        self == ResolvedKind::DefinitelyNot
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedKind::Definitely => "definitely",
            ResolvedKind::DefinitelyNot => "definitely-not",
            ResolvedKind::Indeterminate => "indeterminate",
        }
    }
}

impl std::fmt::Display for ResolvedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
