//! Token kinds.

/// Token kinds produced by the scanner.
///
/// Contextual keywords (`actor`, `weak`, `unowned`, `async`, `get`, `set`,
/// `some`, `any`, ...) are scanned as `Identifier` and recognized by the
/// parser from their text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Names and literals
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    CommaToken,
    ColonToken,
    SemicolonToken,
    AtToken,
    HashToken,
    BackslashToken,
    EqualsToken,
    ArrowToken,
    LessThanToken,
    GreaterThanToken,
    QuestionToken,
    ExclamationToken,
    AmpersandToken,
    /// Any other operator (`+`, `==`, `&&`, `...`, `..<`, `??`, ...)
    OperatorToken,

    // Keywords
    AsKeyword,
    AssociatedtypeKeyword,
    AwaitKeyword,
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    DeinitKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExtensionKeyword,
    FallthroughKeyword,
    FalseKeyword,
    ForKeyword,
    FuncKeyword,
    GuardKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InitKeyword,
    InoutKeyword,
    IsKeyword,
    LetKeyword,
    NilKeyword,
    OperatorKeyword,
    PrecedencegroupKeyword,
    ProtocolKeyword,
    RepeatKeyword,
    RethrowsKeyword,
    ReturnKeyword,
    SelfKeyword,
    SelfTypeKeyword,
    StaticKeyword,
    StructKeyword,
    SubscriptKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThrowKeyword,
    ThrowsKeyword,
    TrueKeyword,
    TryKeyword,
    TypealiasKeyword,
    VarKeyword,
    WhereKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    /// First keyword in declaration order.
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::AsKeyword;
    /// Last keyword in declaration order.
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WhileKeyword;

    pub fn is_keyword(self) -> bool {
        token_is_keyword(self)
    }

    /// Tokens that can be used as a name after `.`, as an argument label or
    /// as a parameter name.
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    /// Tokens that behave as infix operators inside an expression sequence.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::OperatorToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::AmpersandToken
        )
    }
}

/// Check whether a token kind is a reserved keyword.
pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    let value = kind as u16;
    value >= SyntaxKind::FIRST_KEYWORD as u16 && value <= SyntaxKind::LAST_KEYWORD as u16
}

/// Map identifier text to its keyword kind.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "as" => SyntaxKind::AsKeyword,
        "associatedtype" => SyntaxKind::AssociatedtypeKeyword,
        "await" => SyntaxKind::AwaitKeyword,
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "defer" => SyntaxKind::DeferKeyword,
        "deinit" => SyntaxKind::DeinitKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "extension" => SyntaxKind::ExtensionKeyword,
        "fallthrough" => SyntaxKind::FallthroughKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "for" => SyntaxKind::ForKeyword,
        "func" => SyntaxKind::FuncKeyword,
        "guard" => SyntaxKind::GuardKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "in" => SyntaxKind::InKeyword,
        "init" => SyntaxKind::InitKeyword,
        "inout" => SyntaxKind::InoutKeyword,
        "is" => SyntaxKind::IsKeyword,
        "let" => SyntaxKind::LetKeyword,
        "nil" => SyntaxKind::NilKeyword,
        "operator" => SyntaxKind::OperatorKeyword,
        "precedencegroup" => SyntaxKind::PrecedencegroupKeyword,
        "protocol" => SyntaxKind::ProtocolKeyword,
        "repeat" => SyntaxKind::RepeatKeyword,
        "rethrows" => SyntaxKind::RethrowsKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "self" => SyntaxKind::SelfKeyword,
        "Self" => SyntaxKind::SelfTypeKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "subscript" => SyntaxKind::SubscriptKeyword,
        "super" => SyntaxKind::SuperKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "throws" => SyntaxKind::ThrowsKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "typealias" => SyntaxKind::TypealiasKeyword,
        "var" => SyntaxKind::VarKeyword,
        "where" => SyntaxKind::WhereKeyword,
        "while" => SyntaxKind::WhileKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Whether `text` names the enclosing instance, in plain or back-ticked
/// spelling.
pub fn is_self_name(text: &str) -> bool {
    text == "self" || text == "`self`"
}
