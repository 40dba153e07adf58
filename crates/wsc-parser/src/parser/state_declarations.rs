//! Parser state - declaration parsing methods (types, functions, variables,
//! enum cases, attributes and modifiers)

use wsc_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{
    BlockData, EnumCaseElementData, FunctionDeclData, FunctionKind, IdentifierData, NodeKind,
    ParameterData, PatternBindingData, TypeAliasData, TypeDeclData, TypeDeclKind,
    VariableDeclData,
};
use super::state::{CONTEXT_FLAG_IN_TYPE_BODY, CONTEXT_FLAG_NO_TRAILING_CLOSURE, ParserState};

/// Declaration modifiers spelled as plain identifiers.
const DECLARATION_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "fileprivate",
    "internal",
    "open",
    "package",
    "final",
    "override",
    "mutating",
    "nonmutating",
    "lazy",
    "weak",
    "unowned",
    "optional",
    "required",
    "convenience",
    "dynamic",
    "indirect",
    "nonisolated",
    "isolated",
    "distributed",
    "prefix",
    "postfix",
    "infix",
    "consuming",
    "borrowing",
    "__consuming",
];

/// Accessor names inside a property or subscript accessor block.
const ACCESSOR_NAMES: &[&str] = &[
    "get",
    "set",
    "willSet",
    "didSet",
    "_read",
    "_modify",
    "unsafeAddress",
    "unsafeMutableAddress",
];

/// Modifiers allowed before an accessor name.
const ACCESSOR_MODIFIERS: &[&str] = &["mutating", "nonmutating", "__consuming"];

impl ParserState {
    // =========================================================================
    // Attributes and modifiers
    // =========================================================================

    /// Skip `@name`, `@name.member` and `@name(arguments)`.
    pub(crate) fn skip_attribute(&mut self) {
        self.next_token(); // `@`
        if self.is_identifier_or_keyword() {
            self.next_token();
        }
        while self.is_token(SyntaxKind::DotToken) && !self.has_preceding_whitespace() {
            self.next_token();
            if self.is_identifier_or_keyword() {
                self.next_token();
            }
        }
        if self.is_token(SyntaxKind::OpenParenToken) && !self.has_preceding_whitespace() {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
    }

    fn is_declaration_modifier(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) && DECLARATION_MODIFIERS.contains(&self.token_text())
    }

    /// Skip attributes and modifiers that precede a declaration keyword.
    /// Returns whether anything was skipped.
    pub(crate) fn skip_modifiers_and_attributes(&mut self) -> bool {
        let start = self.token_pos();
        loop {
            match self.token() {
                SyntaxKind::AtToken => self.skip_attribute(),
                SyntaxKind::StaticKeyword => {
                    self.next_token();
                }
                SyntaxKind::ClassKeyword if self.look_ahead_is_class_modifier() => {
                    self.next_token();
                }
                SyntaxKind::Identifier
                    if self.is_declaration_modifier()
                        && self.look_ahead_is_modifier_before_declaration() =>
                {
                    self.next_token();
                    if self.is_token(SyntaxKind::OpenParenToken) && !self.has_preceding_whitespace()
                    {
                        self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                    }
                }
                _ => break,
            }
        }
        self.token_pos() != start
    }

    /// Look ahead to see if `class` is a modifier (`class func`, `class var`).
    fn look_ahead_is_class_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::FuncKeyword
                    | SyntaxKind::VarKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::SubscriptKeyword
                    | SyntaxKind::TypealiasKeyword
                    | SyntaxKind::StaticKeyword
                    | SyntaxKind::AtToken
            ) || p.is_declaration_modifier()
        })
    }

    /// Look ahead to see if a modifier identifier (`public`, `weak`, ...) is
    /// followed on the same line by a declaration.
    fn look_ahead_is_modifier_before_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::OpenParenToken) && !p.has_preceding_whitespace() {
                p.next_token();
                if !p.is_token(SyntaxKind::Identifier) {
                    return false;
                }
                p.next_token();
                if !p.is_token(SyntaxKind::CloseParenToken) {
                    return false;
                }
                p.next_token();
            }
            if p.has_preceding_line_break() {
                return false;
            }
            matches!(
                p.token(),
                SyntaxKind::AtToken | SyntaxKind::StaticKeyword | SyntaxKind::ClassKeyword
            ) || p.is_declaration_modifier()
                || p.is_declaration_keyword()
        })
    }

    /// Whether the current token (after modifiers) starts a declaration.
    fn is_declaration_keyword(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ProtocolKeyword
            | SyntaxKind::ExtensionKeyword
            | SyntaxKind::FuncKeyword
            | SyntaxKind::InitKeyword
            | SyntaxKind::DeinitKeyword
            | SyntaxKind::SubscriptKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::TypealiasKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::AssociatedtypeKeyword
            | SyntaxKind::OperatorKeyword
            | SyntaxKind::PrecedencegroupKeyword => true,
            SyntaxKind::CaseKeyword => self.in_context(CONTEXT_FLAG_IN_TYPE_BODY),
            SyntaxKind::Identifier if self.is_contextual("actor") => self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::Identifier) && !p.has_preceding_line_break()
            }),
            _ => false,
        }
    }

    /// Look ahead past attributes and modifiers for a declaration keyword.
    pub(crate) fn is_start_of_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AtToken
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::Identifier => self.look_ahead(|p| {
                p.skip_modifiers_and_attributes();
                p.is_declaration_keyword()
            }),
            _ => self.is_declaration_keyword(),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(crate) fn parse_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.skip_modifiers_and_attributes();
        match self.token() {
            SyntaxKind::ClassKeyword => self.parse_type_declaration(TypeDeclKind::Class, pos),
            SyntaxKind::StructKeyword => self.parse_type_declaration(TypeDeclKind::Struct, pos),
            SyntaxKind::EnumKeyword => self.parse_type_declaration(TypeDeclKind::Enum, pos),
            SyntaxKind::ProtocolKeyword => {
                self.parse_type_declaration(TypeDeclKind::Protocol, pos)
            }
            SyntaxKind::ExtensionKeyword => {
                self.parse_type_declaration(TypeDeclKind::Extension, pos)
            }
            SyntaxKind::Identifier if self.is_contextual("actor") => {
                self.parse_type_declaration(TypeDeclKind::Actor, pos)
            }
            SyntaxKind::FuncKeyword => self.parse_function_declaration(pos),
            SyntaxKind::InitKeyword => self.parse_initializer_declaration(pos),
            SyntaxKind::DeinitKeyword => {
                let name = self.parse_identifier_node();
                let body = self.parse_function_body();
                self.finish_function(FunctionKind::Deinitializer, name, Vec::new(), NodeIndex::NONE, body, pos)
            }
            SyntaxKind::SubscriptKeyword => self.parse_subscript_declaration(pos),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword => {
                self.parse_variable_declaration(pos)
            }
            SyntaxKind::CaseKeyword => self.parse_enum_case_declaration(pos),
            SyntaxKind::TypealiasKeyword => self.parse_type_alias_declaration(pos),
            SyntaxKind::ImportKeyword
            | SyntaxKind::AssociatedtypeKeyword
            | SyntaxKind::OperatorKeyword => {
                self.skip_rest_of_line();
                NodeIndex::NONE
            }
            SyntaxKind::PrecedencegroupKeyword => {
                self.next_token();
                if self.is_identifier_or_keyword() {
                    self.next_token();
                }
                self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                NodeIndex::NONE
            }
            _ => {
                self.error_at_current_token("Declaration expected.");
                NodeIndex::NONE
            }
        }
    }

    /// `class|struct|enum|protocol|actor Name<...>: Inherited where ... { members }`
    /// and `extension Type: Inherited where ... { members }`.
    fn parse_type_declaration(&mut self, kind: TypeDeclKind, pos: u32) -> NodeIndex {
        self.next_token();
        let name = if kind == TypeDeclKind::Extension {
            self.parse_type()
        } else if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            self.missing_node("Identifier expected.")
        };
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }

        let mut inheritance = Vec::new();
        if self.parse_optional(SyntaxKind::ColonToken) {
            loop {
                inheritance.push(self.parse_type());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        self.skip_where_clause();

        let members = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_member_block()
        } else {
            self.error_at_current_token("'{' expected.");
            Vec::new()
        };

        self.finish_node(
            NodeKind::TypeDecl(TypeDeclData {
                kind,
                name,
                inheritance,
                members,
            }),
            pos,
        )
    }

    fn parse_member_block(&mut self) -> Vec<NodeIndex> {
        self.next_token(); // `{`
        let members = self.with_context(
            CONTEXT_FLAG_IN_TYPE_BODY,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE,
            |p| p.parse_statement_list(SyntaxKind::CloseBraceToken),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken, "'}' expected.");
        members
    }

    /// Skip a generic `where` clause up to the body brace, or up to the next
    /// declaration for body-less requirements.
    fn skip_where_clause(&mut self) {
        if !self.parse_optional(SyntaxKind::WhereKeyword) {
            return;
        }
        while !self.is_at_end()
            && !self.is_token(SyntaxKind::OpenBraceToken)
            && !self.is_token(SyntaxKind::CloseBraceToken)
        {
            if self.has_preceding_line_break() && self.is_start_of_declaration() {
                break;
            }
            self.next_token();
        }
    }

    fn parse_function_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token(); // `func`
        let name = self.parse_function_name();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        let parameters = self.parse_parameter_clause();
        self.skip_effect_specifiers();
        let result = if self.parse_optional(SyntaxKind::ArrowToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.skip_where_clause();
        let body = self.parse_function_body();
        self.finish_function(FunctionKind::Function, name, parameters, result, body, pos)
    }

    /// Function name: an identifier, or an operator (`==`, `<`, `+++`).
    fn parse_function_name(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() {
            return self.parse_identifier_node();
        }
        let pos = self.token_pos();
        let mut consumed = false;
        while matches!(
            self.token(),
            SyntaxKind::OperatorToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::AmpersandToken
        ) && (!consumed || !self.has_preceding_whitespace())
        {
            self.next_token();
            consumed = true;
        }
        if consumed {
            self.finish_node(
                NodeKind::Identifier(IdentifierData {
                    token: SyntaxKind::OperatorToken,
                }),
                pos,
            )
        } else {
            self.missing_node("Identifier expected.")
        }
    }

    fn parse_initializer_declaration(&mut self, pos: u32) -> NodeIndex {
        let name = self.parse_identifier_node(); // `init`
        if matches!(
            self.token(),
            SyntaxKind::QuestionToken | SyntaxKind::ExclamationToken
        ) && !self.has_preceding_whitespace()
        {
            self.next_token();
        }
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        let parameters = self.parse_parameter_clause();
        self.skip_effect_specifiers();
        self.skip_where_clause();
        let body = self.parse_function_body();
        self.finish_function(
            FunctionKind::Initializer,
            name,
            parameters,
            NodeIndex::NONE,
            body,
            pos,
        )
    }

    fn parse_subscript_declaration(&mut self, pos: u32) -> NodeIndex {
        let name = self.parse_identifier_node(); // `subscript`
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        let parameters = self.parse_parameter_clause();
        let result = if self.parse_optional(SyntaxKind::ArrowToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.skip_where_clause();
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_accessor_block()
        } else {
            NodeIndex::NONE
        };
        self.finish_function(FunctionKind::Subscript, name, parameters, result, body, pos)
    }

    fn finish_function(
        &mut self,
        kind: FunctionKind,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        result: NodeIndex,
        body: NodeIndex,
        pos: u32,
    ) -> NodeIndex {
        self.finish_node(
            NodeKind::FunctionDecl(FunctionDeclData {
                kind,
                name,
                parameters,
                result,
                body,
            }),
            pos,
        )
    }

    /// Body block, or `NONE` for a requirement without a body.
    fn parse_function_body(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        }
    }

    /// Skip `async`, `throws`, `throws(E)`, `rethrows` and `reasync`.
    pub(crate) fn skip_effect_specifiers(&mut self) -> bool {
        let mut skipped = false;
        loop {
            if self.is_contextual("async") || self.is_contextual("reasync") {
                self.next_token();
            } else if self.is_token(SyntaxKind::ThrowsKeyword) {
                self.next_token();
                if self.is_token(SyntaxKind::OpenParenToken) && !self.has_preceding_whitespace() {
                    self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                }
            } else if self.is_token(SyntaxKind::RethrowsKeyword) {
                self.next_token();
            } else {
                break;
            }
            skipped = true;
        }
        skipped
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// `( parameter, ... )`
    pub(crate) fn parse_parameter_clause(&mut self) -> Vec<NodeIndex> {
        let mut parameters = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken, "'(' expected.") {
            return parameters;
        }
        self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| {
                while !p.is_token(SyntaxKind::CloseParenToken) && !p.is_at_end() {
                    parameters.push(p.parse_parameter());
                    if !p.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            },
        );
        if !self.is_token(SyntaxKind::CloseParenToken) {
            self.error_at_current_token("')' expected.");
            self.skip_to_closer(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
        self.parse_optional(SyntaxKind::CloseParenToken);
        parameters
    }

    /// `[label] name: Type [...] [= default]`
    fn parse_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_attribute();
        }
        let first_name = if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            self.missing_node("Parameter name expected.")
        };
        let second_name = if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            NodeIndex::NONE
        };
        let ty = if self.parse_expected(SyntaxKind::ColonToken, "':' expected.") {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.skip_variadic_marker();
        let default_value = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            NodeKind::Parameter(ParameterData {
                first_name,
                second_name,
                ty,
                default_value,
            }),
            pos,
        )
    }

    pub(crate) fn skip_variadic_marker(&mut self) {
        if self.is_token(SyntaxKind::OperatorToken) && self.token_text() == "..." {
            self.next_token();
        }
    }

    /// Skip to the `close` token matching an already-consumed `open`,
    /// without crossing an enclosing `}`.
    pub(crate) fn skip_to_closer(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0u32;
        while !self.is_at_end() {
            let token = self.token();
            if token == close {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            } else if token == open {
                depth += 1;
            } else if token == SyntaxKind::CloseBraceToken && depth == 0 {
                return;
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Variables and accessors
    // =========================================================================

    /// `let|var pattern [: T] [= value] [{ accessors }], ...`
    fn parse_variable_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token(); // `let` / `var`
        let mut elements = Vec::new();
        loop {
            let binding_pos = self.token_pos();
            let pattern = self.parse_binding_pattern();
            let ty = if self.parse_optional(SyntaxKind::ColonToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_expression()
            } else {
                NodeIndex::NONE
            };
            let accessors = if self.is_token(SyntaxKind::OpenBraceToken)
                && (initializer.is_none() || self.look_ahead_is_observer_block())
            {
                self.parse_accessor_block()
            } else {
                NodeIndex::NONE
            };
            elements.push(self.finish_node(
                NodeKind::PatternBinding(PatternBindingData {
                    pattern,
                    ty,
                    initializer,
                    accessors,
                }),
                binding_pos,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node(NodeKind::VariableDecl(VariableDeclData { elements }), pos)
    }

    /// Look ahead to see if `{` opens a `willSet`/`didSet` observer block.
    pub(crate) fn look_ahead_is_observer_block(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !(p.is_contextual("willSet") || p.is_contextual("didSet")) {
                return false;
            }
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken
            )
        })
    }

    /// Look ahead to see if `{` opens a list of accessors rather than an
    /// implicit getter body.
    fn look_ahead_is_accessor_list(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            while p.is_token(SyntaxKind::AtToken) {
                p.skip_attribute();
            }
            while p.is_token(SyntaxKind::Identifier) && ACCESSOR_MODIFIERS.contains(&p.token_text())
            {
                p.next_token();
            }
            let takes_parameter = p.is_contextual("set")
                || p.is_contextual("willSet")
                || p.is_contextual("didSet");
            if !(p.is_token(SyntaxKind::Identifier) && ACCESSOR_NAMES.contains(&p.token_text())) {
                return false;
            }
            p.next_token();
            p.has_preceding_line_break()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBraceToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::Identifier
                        | SyntaxKind::ThrowsKeyword
                )
                || (takes_parameter && p.is_token(SyntaxKind::OpenParenToken))
        })
    }

    /// `{ get { } set(value) { } }` or an implicit getter `{ statements }`.
    pub(crate) fn parse_accessor_block(&mut self) -> NodeIndex {
        if !self.look_ahead_is_accessor_list() {
            return self.parse_block();
        }
        let pos = self.token_pos();
        self.next_token(); // `{`
        let mut accessors = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_at_end() {
            let before = self.token_pos();
            let accessor_pos = self.token_pos();
            while self.is_token(SyntaxKind::AtToken) {
                self.skip_attribute();
            }
            while self.is_token(SyntaxKind::Identifier)
                && ACCESSOR_MODIFIERS.contains(&self.token_text())
            {
                self.next_token();
            }
            if self.is_identifier_or_keyword() {
                let name = self.parse_identifier_node();
                let mut parameters = Vec::new();
                if self.is_token(SyntaxKind::OpenParenToken) {
                    let param_pos = self.token_pos();
                    self.next_token();
                    if self.is_identifier_or_keyword() {
                        let first_name = self.parse_identifier_node();
                        parameters.push(self.finish_node(
                            NodeKind::Parameter(ParameterData {
                                first_name,
                                second_name: NodeIndex::NONE,
                                ty: NodeIndex::NONE,
                                default_value: NodeIndex::NONE,
                            }),
                            param_pos,
                        ));
                    }
                    self.parse_expected(SyntaxKind::CloseParenToken, "')' expected.");
                }
                self.skip_effect_specifiers();
                let body = self.parse_function_body();
                accessors.push(self.finish_function(
                    FunctionKind::Accessor,
                    name,
                    parameters,
                    NodeIndex::NONE,
                    body,
                    accessor_pos,
                ));
            } else {
                self.error_at_current_token("Accessor expected.");
            }
            if self.token_pos() == before && !self.is_at_end() {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken, "'}' expected.");
        self.finish_node(
            NodeKind::Block(BlockData {
                statements: accessors,
            }),
            pos,
        )
    }

    // =========================================================================
    // Enum cases and type aliases
    // =========================================================================

    /// `case a, b(Int), c(label: T) = raw`
    fn parse_enum_case_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token(); // `case`
        let mut elements = Vec::new();
        loop {
            let element_pos = self.token_pos();
            let name = if self.is_identifier_or_keyword() {
                self.parse_identifier_node()
            } else {
                self.missing_node("Identifier expected.")
            };
            let associated_value = if self.is_token(SyntaxKind::OpenParenToken) {
                self.parse_tuple_type()
            } else {
                NodeIndex::NONE
            };
            let raw_value = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_expression()
            } else {
                NodeIndex::NONE
            };
            elements.push(self.finish_node(
                NodeKind::EnumCaseElement(EnumCaseElementData {
                    name,
                    associated_value,
                    raw_value,
                }),
                element_pos,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node(NodeKind::EnumCase(VariableDeclData { elements }), pos)
    }

    fn parse_type_alias_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token(); // `typealias`
        let name = if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            self.missing_node("Identifier expected.")
        };
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        let ty = if self.parse_expected(SyntaxKind::EqualsToken, "'=' expected.") {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(NodeKind::TypeAlias(TypeAliasData { name, ty }), pos)
    }
}
