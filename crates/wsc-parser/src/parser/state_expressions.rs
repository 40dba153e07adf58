//! Parser state - expression parsing methods
//!
//! Infix expressions are not folded by precedence: operands and operators are
//! kept flat in a `Sequence` node. Only the shape of postfix chains (member
//! access, calls, trailing closures) matters to the checker.

use wsc_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{
    ArgumentData, CallData, CaptureItemData, CaptureSpecifier, CastData, ClosureData,
    ClosureParameters, DictionaryElementData, GenericSpecializationData, IdentifierData,
    ListData, LiteralData, MemberAccessData, NodeKind, OperatorData, ParameterData, PostfixData,
    PrefixData, StringLiteralData, SubscriptData, TernaryData, ValueBindingData,
};
use super::state::{CONTEXT_FLAG_IN_TYPE_BODY, CONTEXT_FLAG_NO_TRAILING_CLOSURE, ParserState};

type ClosureSignature = (Vec<NodeIndex>, ClosureParameters, NodeIndex);

impl ParserState {
    // =========================================================================
    // Sequences
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node("Expression expected.");
        }
        let expression = self.parse_sequence_expression();
        self.exit_recursion();
        expression
    }

    fn parse_sequence_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let first = self.parse_prefix_expression();
        let mut elements = vec![first];

        loop {
            match self.token() {
                SyntaxKind::QuestionToken if self.has_preceding_whitespace() => {
                    let ternary_pos = self.token_pos();
                    self.next_token();
                    let then_expression = self.with_context(
                        0,
                        CONTEXT_FLAG_NO_TRAILING_CLOSURE,
                        |p| p.parse_expression(),
                    );
                    self.parse_expected(SyntaxKind::ColonToken, "':' expected.");
                    elements.push(
                        self.finish_node(NodeKind::Ternary(TernaryData { then_expression }), ternary_pos),
                    );
                    elements.push(self.parse_prefix_expression());
                }
                SyntaxKind::AsKeyword | SyntaxKind::IsKeyword => {
                    elements.push(self.parse_cast());
                }
                SyntaxKind::ArrowToken => {
                    elements.push(self.parse_operator_node());
                    elements.push(self.parse_prefix_expression());
                }
                kind if kind.is_binary_operator() && self.is_infix_operator() => {
                    elements.push(self.parse_operator_node());
                    elements.push(self.parse_prefix_expression());
                }
                _ => break,
            }
        }

        if elements.len() == 1 {
            first
        } else {
            self.finish_node(NodeKind::Sequence(ListData { elements }), pos)
        }
    }

    /// An operator is infix when it is bound to both operands or to neither.
    fn is_infix_operator(&mut self) -> bool {
        if self.is_token(SyntaxKind::EqualsToken) {
            return true;
        }
        let left_bound = !self.has_preceding_whitespace();
        let right_bound = self.look_ahead(|p| {
            p.skip_operator_run();
            !p.has_preceding_whitespace()
                && !matches!(
                    p.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                )
        });
        left_bound == right_bound
    }

    /// Consume one operator. Angle brackets are scanned alone so generic
    /// argument lists close cleanly; `>=`, `>>` and `<<` are glued back
    /// together here.
    fn skip_operator_run(&mut self) {
        let glue = matches!(
            self.token(),
            SyntaxKind::GreaterThanToken | SyntaxKind::LessThanToken
        );
        self.next_token();
        if glue {
            while matches!(
                self.token(),
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::OperatorToken
            ) && !self.has_preceding_whitespace()
            {
                self.next_token();
            }
        }
    }

    fn parse_operator_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let token = self.token();
        self.skip_operator_run();
        self.finish_node(NodeKind::Operator(OperatorData { token }), pos)
    }

    /// `as Type`, `as? Type`, `as! Type`, `is Type`
    fn parse_cast(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let keyword = self.token();
        self.next_token();
        if keyword == SyntaxKind::AsKeyword
            && matches!(
                self.token(),
                SyntaxKind::QuestionToken | SyntaxKind::ExclamationToken
            )
            && !self.has_preceding_whitespace()
        {
            self.next_token();
        }
        let ty = self.parse_type();
        self.finish_node(NodeKind::Cast(CastData { keyword, ty }), pos)
    }

    // =========================================================================
    // Prefix expressions
    // =========================================================================

    fn parse_prefix_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::TryKeyword | SyntaxKind::AwaitKeyword => {
                let operator = self.token();
                self.next_token();
                if operator == SyntaxKind::TryKeyword
                    && matches!(
                        self.token(),
                        SyntaxKind::QuestionToken | SyntaxKind::ExclamationToken
                    )
                    && !self.has_preceding_whitespace()
                {
                    self.next_token();
                }
                let operand = self.parse_prefix_operand();
                self.finish_node(NodeKind::Prefix(PrefixData { operator, operand }), pos)
            }
            SyntaxKind::OperatorToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken => {
                if self.has_following_whitespace() {
                    // Operator used as a function value: `reduce(0, +)`
                    let token = self.token();
                    self.skip_operator_run();
                    return self
                        .finish_node(NodeKind::Identifier(IdentifierData { token }), pos);
                }
                let operator = self.token();
                self.next_token();
                let operand = self.parse_prefix_operand();
                self.finish_node(NodeKind::Prefix(PrefixData { operator, operand }), pos)
            }
            SyntaxKind::BackslashToken => {
                // Key path: `\.name`, `\Type.name`
                self.next_token();
                let operand = self.parse_postfix_expression();
                self.finish_node(
                    NodeKind::Prefix(PrefixData {
                        operator: SyntaxKind::BackslashToken,
                        operand,
                    }),
                    pos,
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_prefix_operand(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node("Expression expected.");
        }
        let operand = self.parse_prefix_expression();
        self.exit_recursion();
        operand
    }

    // =========================================================================
    // Postfix expressions
    // =========================================================================

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_primary_expression();

        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = if self.is_identifier_or_keyword()
                        || self.is_token(SyntaxKind::IntegerLiteral)
                    {
                        self.parse_identifier_node()
                    } else {
                        self.missing_node("Member name expected.")
                    };
                    expression = self.finish_node(
                        NodeKind::MemberAccess(MemberAccessData {
                            base: expression,
                            name,
                        }),
                        pos,
                    );
                }
                SyntaxKind::OpenParenToken if !self.has_preceding_line_break() => {
                    let arguments =
                        self.parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                    let (trailing_closure, additional_trailing_closures) =
                        if self.can_start_trailing_closure(None) {
                            self.parse_trailing_closures()
                        } else {
                            (NodeIndex::NONE, Vec::new())
                        };
                    expression = self.finish_node(
                        NodeKind::Call(CallData {
                            callee: expression,
                            arguments,
                            trailing_closure,
                            additional_trailing_closures,
                        }),
                        pos,
                    );
                }
                SyntaxKind::OpenBraceToken if self.can_start_trailing_closure(Some(expression)) => {
                    let (trailing_closure, additional_trailing_closures) =
                        self.parse_trailing_closures();
                    expression = self.finish_node(
                        NodeKind::Call(CallData {
                            callee: expression,
                            arguments: Vec::new(),
                            trailing_closure,
                            additional_trailing_closures,
                        }),
                        pos,
                    );
                }
                SyntaxKind::OpenBracketToken if !self.has_preceding_line_break() => {
                    let arguments = self.parse_argument_list(
                        SyntaxKind::OpenBracketToken,
                        SyntaxKind::CloseBracketToken,
                    );
                    expression = self.finish_node(
                        NodeKind::Subscript(SubscriptData {
                            base: expression,
                            arguments,
                        }),
                        pos,
                    );
                }
                SyntaxKind::ExclamationToken | SyntaxKind::QuestionToken
                    if !self.has_preceding_whitespace() =>
                {
                    let operator = self.token();
                    self.next_token();
                    expression = self.finish_node(
                        NodeKind::Postfix(PostfixData {
                            operand: expression,
                            operator,
                        }),
                        pos,
                    );
                }
                SyntaxKind::OperatorToken
                    if !self.has_preceding_whitespace() && self.has_following_whitespace() =>
                {
                    // `x...`, `i++`
                    self.next_token();
                    expression = self.finish_node(
                        NodeKind::Postfix(PostfixData {
                            operand: expression,
                            operator: SyntaxKind::OperatorToken,
                        }),
                        pos,
                    );
                }
                SyntaxKind::LessThanToken if !self.has_preceding_whitespace() => {
                    let Some(arguments) = self.try_parse_generic_arguments() else {
                        break;
                    };
                    expression = self.finish_node(
                        NodeKind::GenericSpecialization(GenericSpecializationData {
                            base: expression,
                            arguments,
                        }),
                        pos,
                    );
                }
                _ => break,
            }
        }
        expression
    }

    /// Speculatively parse `<T, U>` after an expression. Fails (and rewinds)
    /// unless the closing `>` is followed by something that cannot continue
    /// a comparison.
    fn try_parse_generic_arguments(&mut self) -> Option<Vec<NodeIndex>> {
        self.try_parse(|p| {
            p.next_token(); // `<`
            let mut arguments = Vec::new();
            loop {
                if !p.is_start_of_type() {
                    return None;
                }
                arguments.push(p.parse_type());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            if !p.parse_optional(SyntaxKind::GreaterThanToken) {
                return None;
            }
            let follows = p.has_preceding_line_break()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenParenToken
                        | SyntaxKind::DotToken
                        | SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::EndOfFileToken
                );
            follows.then_some(arguments)
        })
    }

    /// Whether `{` at the current token opens a trailing closure. `callee`
    /// is `None` right after a parenthesized argument list.
    fn can_start_trailing_closure(&mut self, callee: Option<NodeIndex>) -> bool {
        if !self.is_token(SyntaxKind::OpenBraceToken)
            || self.in_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE)
            || self.look_ahead_is_observer_block()
        {
            return false;
        }
        let Some(callee) = callee else {
            return true;
        };
        match self.arena.kind(callee) {
            Some(NodeKind::Identifier(data)) => matches!(
                data.token,
                SyntaxKind::Identifier
                    | SyntaxKind::SelfTypeKeyword
                    | SyntaxKind::InitKeyword
                    | SyntaxKind::HashToken
            ),
            Some(
                NodeKind::MemberAccess(_)
                | NodeKind::Postfix(_)
                | NodeKind::GenericSpecialization(_)
                | NodeKind::Subscript(_),
            ) => true,
            _ => false,
        }
    }

    /// `{ ... } label: { ... } label: { ... }`
    fn parse_trailing_closures(&mut self) -> (NodeIndex, Vec<NodeIndex>) {
        let first = self.parse_closure_expression();
        let mut additional = Vec::new();
        while self.is_identifier_or_keyword()
            && !matches!(
                self.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            )
            && self.look_ahead(|p| {
                p.next_token();
                if !p.is_token(SyntaxKind::ColonToken) {
                    return false;
                }
                p.next_token();
                p.is_token(SyntaxKind::OpenBraceToken)
            })
        {
            let pos = self.token_pos();
            let label = self.parse_identifier_node();
            self.next_token(); // `:`
            let expression = self.parse_closure_expression();
            additional.push(self.finish_node(NodeKind::Argument(ArgumentData { label, expression }), pos));
        }
        (first, additional)
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    /// `( [label:] expr, ... )` or `[ ... ]`; returns `Argument` nodes.
    pub(crate) fn parse_argument_list(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> Vec<NodeIndex> {
        self.next_token(); // open
        let arguments = self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| {
                let mut arguments = Vec::new();
                while !p.is_token(close) && !p.is_at_end() {
                    arguments.push(p.parse_argument());
                    if !p.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                arguments
            },
        );
        if !self.is_token(close) {
            self.error_at_current_token(if close == SyntaxKind::CloseParenToken {
                "')' expected."
            } else {
                "']' expected."
            });
            self.skip_to_closer(open, close);
        }
        self.parse_optional(close);
        arguments
    }

    fn parse_argument(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let label = if self.is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::ColonToken)
            }) {
            let label = self.parse_identifier_node();
            self.next_token(); // `:`
            label
        } else {
            NodeIndex::NONE
        };
        // `#selector(run(_:with:))` names arguments without values.
        let expression = if label.is_some()
            && matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken
            ) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.finish_node(NodeKind::Argument(ArgumentData { label, expression }), pos)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier
            | SyntaxKind::SelfKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::SelfTypeKeyword
            | SyntaxKind::InitKeyword => self.parse_identifier_node(),
            SyntaxKind::IntegerLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NilKeyword => {
                let token = self.token();
                self.next_token();
                self.finish_node(NodeKind::Literal(LiteralData { token }), pos)
            }
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::DotToken => {
                // Implicit member: `.main`, `.init(x)`
                self.next_token();
                let name = if self.is_identifier_or_keyword() {
                    self.parse_identifier_node()
                } else {
                    self.missing_node("Member name expected.")
                };
                self.finish_node(
                    NodeKind::MemberAccess(MemberAccessData {
                        base: NodeIndex::NONE,
                        name,
                    }),
                    pos,
                )
            }
            SyntaxKind::OpenParenToken => self.parse_tuple_expression(),
            SyntaxKind::OpenBracketToken => self.parse_collection_expression(),
            SyntaxKind::OpenBraceToken => self.parse_closure_expression(),
            SyntaxKind::HashToken => self.parse_pound_expression(),
            SyntaxKind::IfKeyword | SyntaxKind::SwitchKeyword | SyntaxKind::DoKeyword => {
                self.parse_statement()
            }
            SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => {
                // Binding pattern: `case let .some(x)`, `(let a, var b)`
                self.next_token();
                let pattern = self.parse_prefix_operand();
                self.finish_node(
                    NodeKind::ValueBinding(ValueBindingData {
                        pattern,
                        ty: NodeIndex::NONE,
                        initializer: NodeIndex::NONE,
                    }),
                    pos,
                )
            }
            SyntaxKind::IsKeyword => self.parse_cast(),
            SyntaxKind::AtToken => {
                while self.is_token(SyntaxKind::AtToken) {
                    self.skip_attribute();
                }
                self.parse_primary_expression()
            }
            _ => self.missing_node("Expression expected."),
        }
    }

    /// `#selector(...)`, `#file`, `#available(...)`, macro expansions.
    fn parse_pound_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token(); // `#`
        let available = self.is_contextual("available") || self.is_contextual("unavailable");
        if self.is_identifier_or_keyword() && !self.has_preceding_whitespace() {
            self.next_token();
        } else {
            self.error_at_current_token("Identifier expected.");
        }
        if available {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
        self.finish_node(
            NodeKind::Identifier(IdentifierData {
                token: SyntaxKind::HashToken,
            }),
            pos,
        )
    }

    /// String literal; interpolated segments are parsed as argument lists.
    fn parse_string_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let interpolations = self.scanner.interpolations().to_vec();
        let mut segments = Vec::new();

        if !interpolations.is_empty() && self.enter_recursion() {
            let saved_scanner = self.scanner.save_state();
            let saved_token = self.current_token;
            let saved_previous_end = self.previous_end;
            for (start, end) in interpolations {
                self.scanner.set_window(start, end);
                self.next_token();
                self.with_context(
                    0,
                    CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
                    |p| {
                        while !p.is_at_end() {
                            let before = p.token_pos();
                            segments.push(p.parse_argument());
                            if !p.parse_optional(SyntaxKind::CommaToken) && p.token_pos() == before {
                                p.next_token();
                            }
                        }
                    },
                );
            }
            self.scanner.restore_state(saved_scanner);
            self.current_token = saved_token;
            self.previous_end = saved_previous_end;
            self.exit_recursion();
        }

        self.next_token();
        self.finish_node(NodeKind::StringLiteral(StringLiteralData { segments }), pos)
    }

    /// Parenthesized expression or tuple; elements are `Argument` nodes.
    pub(crate) fn parse_tuple_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let elements =
            self.parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        self.finish_node(NodeKind::Tuple(ListData { elements }), pos)
    }

    /// Array literal, dictionary literal or `[:]`.
    fn parse_collection_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token(); // `[`
        let elements = self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| {
                let mut elements = Vec::new();
                if p.parse_optional(SyntaxKind::ColonToken) {
                    return elements;
                }
                while !p.is_token(SyntaxKind::CloseBracketToken) && !p.is_at_end() {
                    let element_pos = p.token_pos();
                    let key = p.parse_expression();
                    let element = if p.parse_optional(SyntaxKind::ColonToken) {
                        let value = p.parse_expression();
                        p.finish_node(
                            NodeKind::DictionaryElement(DictionaryElementData { key, value }),
                            element_pos,
                        )
                    } else {
                        key
                    };
                    elements.push(element);
                    if !p.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                elements
            },
        );
        if !self.is_token(SyntaxKind::CloseBracketToken) {
            self.error_at_current_token("']' expected.");
            self.skip_to_closer(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
        }
        self.parse_optional(SyntaxKind::CloseBracketToken);
        self.finish_node(NodeKind::Collection(ListData { elements }), pos)
    }

    // =========================================================================
    // Closures
    // =========================================================================

    /// `{ [captures] (params) -> T in statements }`
    pub(crate) fn parse_closure_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token(); // `{`
        let (captures, parameters, result) = self
            .try_parse(|p| p.parse_closure_signature())
            .unwrap_or_default();
        let statements = self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| p.parse_statement_list(SyntaxKind::CloseBraceToken),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken, "'}' expected.");
        self.finish_node(
            NodeKind::Closure(ClosureData {
                captures,
                parameters,
                result,
                statements,
            }),
            pos,
        )
    }

    /// Everything up to and including `in`. `None` when the closure has no
    /// signature, in which case the caller rewinds.
    fn parse_closure_signature(&mut self) -> Option<ClosureSignature> {
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_attribute();
        }
        let captures = if self.is_token(SyntaxKind::OpenBracketToken) {
            self.parse_capture_list()?
        } else {
            Vec::new()
        };

        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            ClosureParameters::Parameters(self.parse_closure_parameter_clause()?)
        } else if matches!(
            self.token(),
            SyntaxKind::Identifier | SyntaxKind::SelfKeyword
        ) {
            let mut names = Vec::new();
            loop {
                if !matches!(
                    self.token(),
                    SyntaxKind::Identifier | SyntaxKind::SelfKeyword
                ) {
                    return None;
                }
                names.push(self.parse_identifier_node());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            ClosureParameters::Shorthand(names)
        } else {
            ClosureParameters::None
        };

        self.skip_effect_specifiers();
        let result = if self.parse_optional(SyntaxKind::ArrowToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        if !self.parse_optional(SyntaxKind::InKeyword) {
            return None;
        }
        Some((captures, parameters, result))
    }

    /// `[weak self, unowned(unsafe) x, y = expr]`
    fn parse_capture_list(&mut self) -> Option<Vec<NodeIndex>> {
        self.next_token(); // `[`
        let mut items = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            items.push(self.parse_capture_item()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.parse_optional(SyntaxKind::CloseBracketToken) {
            return None;
        }
        Some(items)
    }

    fn parse_capture_item(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let specifier = if self.is_contextual("weak") {
            CaptureSpecifier::Weak
        } else if self.is_contextual("unowned") {
            CaptureSpecifier::Unowned
        } else {
            CaptureSpecifier::None
        };
        if specifier != CaptureSpecifier::None {
            self.next_token();
            if self.is_token(SyntaxKind::OpenParenToken) && !self.has_preceding_whitespace() {
                self.next_token();
                if !(self.is_contextual("safe") || self.is_contextual("unsafe")) {
                    return None;
                }
                self.next_token();
                if !self.parse_optional(SyntaxKind::CloseParenToken) {
                    return None;
                }
            }
        }

        let explicit_name = self.is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::EqualsToken)
            });
        let name = if explicit_name {
            let name = self.parse_identifier_node();
            self.next_token(); // `=`
            name
        } else {
            NodeIndex::NONE
        };
        let expression = self.parse_expression();
        if matches!(self.arena.kind(expression), Some(NodeKind::Missing)) {
            return None;
        }
        Some(self.finish_node(
            NodeKind::CaptureItem(CaptureItemData {
                specifier,
                name,
                expression,
            }),
            pos,
        ))
    }

    /// `(a, b: Int, _ c: String)` in a closure signature.
    fn parse_closure_parameter_clause(&mut self) -> Option<Vec<NodeIndex>> {
        self.next_token(); // `(`
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            parameters.push(self.parse_closure_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.parse_optional(SyntaxKind::CloseParenToken) {
            return None;
        }
        Some(parameters)
    }

    fn parse_closure_parameter(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_attribute();
        }
        if !self.is_identifier_or_keyword() {
            return None;
        }
        let first_name = self.parse_identifier_node();
        let second_name = if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            NodeIndex::NONE
        };
        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.skip_variadic_marker();
        Some(self.finish_node(
            NodeKind::Parameter(ParameterData {
                first_name,
                second_name,
                ty,
                default_value: NodeIndex::NONE,
            }),
            pos,
        ))
    }
}
