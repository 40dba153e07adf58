//! Parser state - source file, statement and control-flow parsing methods

use tracing::debug_span;
use wsc_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{BlockData, ControlData, ControlKind, NodeKind, ValueBindingData};
use super::state::{CONTEXT_FLAG_IN_TYPE_BODY, CONTEXT_FLAG_NO_TRAILING_CLOSURE, ParserState};

impl ParserState {
    // =========================================================================
    // Source file and statement lists
    // =========================================================================

    /// Parse the whole file. Never fails; syntax errors are recorded in
    /// `get_diagnostics()`.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let _span = debug_span!("parse_source_file", file = %self.file_name).entered();
        self.next_token();

        let statements = self.parse_statement_list(SyntaxKind::EndOfFileToken);
        self.collect_scanner_diagnostics();

        let end = self.arena.source_text().len() as u32;
        self.arena
            .add(NodeKind::SourceFile(BlockData { statements }), 0, end)
    }

    /// Parse statements until `terminator` or end of file. The terminator is
    /// not consumed.
    pub(crate) fn parse_statement_list(&mut self, terminator: SyntaxKind) -> Vec<NodeIndex> {
        self.parse_statements_until(|p| p.is_token(terminator))
    }

    pub(crate) fn parse_statements_until(
        &mut self,
        stop: impl Fn(&ParserState) -> bool,
    ) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        loop {
            while self.parse_optional(SyntaxKind::SemicolonToken) {}
            if self.is_at_end() || stop(self) {
                break;
            }
            if self.is_token(SyntaxKind::CloseBraceToken) {
                // Stray `}` outside any block.
                self.error_at_current_token("Unexpected '}'.");
                self.next_token();
                continue;
            }

            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before && !self.is_at_end() {
                self.error_at_current_token("Statement expected.");
                self.next_token();
            }
        }
        statements
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statement = self.parse_statement_inner();
        self.exit_recursion();
        statement
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::HashToken if self.look_ahead_is_compilation_directive() => {
                // Conditional compilation is flattened: every branch is parsed.
                self.skip_rest_of_line();
                NodeIndex::NONE
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::GuardKeyword => self.parse_guard_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::RepeatKeyword => self.parse_repeat_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::DeferKeyword => {
                let pos = self.token_pos();
                self.next_token();
                let body = self.parse_block();
                self.finish_control(ControlKind::Defer, vec![body], pos)
            }
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(ControlKind::Return),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(ControlKind::Throw),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(ControlKind::Break),
            SyntaxKind::ContinueKeyword => self.parse_jump_statement(ControlKind::Continue),
            SyntaxKind::FallthroughKeyword => {
                let pos = self.token_pos();
                self.next_token();
                self.finish_control(ControlKind::Fallthrough, Vec::new(), pos)
            }
            SyntaxKind::Identifier if self.look_ahead_is_labeled_statement() => {
                self.next_token();
                self.next_token();
                self.parse_statement_inner()
            }
            _ if self.is_start_of_declaration() => self.parse_declaration(),
            _ => self.parse_expression(),
        }
    }

    /// Look ahead to see if `#` starts `#if`, `#elseif`, `#else` or `#endif`.
    pub(crate) fn look_ahead_is_compilation_directive(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_whitespace()
                && (matches!(p.token(), SyntaxKind::IfKeyword | SyntaxKind::ElseKeyword)
                    || p.is_contextual("elseif")
                    || p.is_contextual("endif"))
        })
    }

    /// Look ahead to see if we have `label: for|while|repeat|switch|if|do`.
    fn look_ahead_is_labeled_statement(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_token(SyntaxKind::ColonToken) {
                return false;
            }
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::ForKeyword
                    | SyntaxKind::WhileKeyword
                    | SyntaxKind::RepeatKeyword
                    | SyntaxKind::SwitchKeyword
                    | SyntaxKind::IfKeyword
                    | SyntaxKind::DoKeyword
            )
        })
    }

    pub(crate) fn finish_control(
        &mut self,
        kind: ControlKind,
        children: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        self.finish_node(NodeKind::Control(ControlData { kind, children }), pos)
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Parse `{ statements }`. Returns a `Missing` node when the brace is
    /// absent.
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return self.missing_node("'{' expected.");
        }
        self.next_token();
        let statements = self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| p.parse_statement_list(SyntaxKind::CloseBraceToken),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken, "'}' expected.");
        self.finish_node(NodeKind::Block(BlockData { statements }), pos)
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// Parse a comma-separated condition list (`if`, `guard`, `while`).
    /// Trailing closures are disabled so the body brace is not consumed.
    fn parse_condition_list(&mut self) -> Vec<NodeIndex> {
        self.with_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE, 0, |p| {
            let mut conditions = Vec::new();
            loop {
                conditions.push(p.parse_condition());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            conditions
        })
    }

    fn parse_condition(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => self.parse_optional_binding(),
            SyntaxKind::CaseKeyword => {
                self.next_token();
                self.parse_expression()
            }
            _ => self.parse_expression(),
        }
    }

    /// `let x = value`, `let x: T = value` or the shorthand `let x`.
    fn parse_optional_binding(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
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
        self.finish_node(
            NodeKind::ValueBinding(ValueBindingData {
                pattern,
                ty,
                initializer,
            }),
            pos,
        )
    }

    /// Pattern after `let`/`var`: a name or a tuple of names.
    pub(crate) fn parse_binding_pattern(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_tuple_expression()
        } else if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            self.missing_node("Identifier expected.")
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = self.parse_condition_list();
        children.push(self.parse_block());
        if self.parse_optional(SyntaxKind::ElseKeyword) {
            if self.is_token(SyntaxKind::IfKeyword) {
                children.push(self.parse_if_statement());
            } else {
                children.push(self.parse_block());
            }
        }
        self.finish_control(ControlKind::If, children, pos)
    }

    fn parse_guard_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = self.parse_condition_list();
        self.parse_expected(SyntaxKind::ElseKeyword, "'else' expected.");
        children.push(self.parse_block());
        self.finish_control(ControlKind::Guard, children, pos)
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = self.parse_condition_list();
        children.push(self.parse_block());
        self.finish_control(ControlKind::While, children, pos)
    }

    fn parse_repeat_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = vec![self.parse_block()];
        if self.parse_expected(SyntaxKind::WhileKeyword, "'while' expected.") {
            children.push(
                self.with_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE, 0, |p| p.parse_expression()),
            );
        }
        self.finish_control(ControlKind::Repeat, children, pos)
    }

    /// `for [try] [await] [case] pattern [: T] in sequence [where cond] { }`
    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_optional(SyntaxKind::TryKeyword);
        self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_optional(SyntaxKind::CaseKeyword);

        let mut children = Vec::new();
        self.with_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE, 0, |p| {
            children.push(p.parse_expression());
            if p.parse_optional(SyntaxKind::ColonToken) {
                children.push(p.parse_type());
            }
            if p.parse_expected(SyntaxKind::InKeyword, "'in' expected.") {
                children.push(p.parse_expression());
            }
            if p.parse_optional(SyntaxKind::WhereKeyword) {
                children.push(p.parse_expression());
            }
        });
        children.push(self.parse_block());
        self.finish_control(ControlKind::For, children, pos)
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children =
            vec![self.with_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE, 0, |p| p.parse_expression())];

        if !self.parse_expected(SyntaxKind::OpenBraceToken, "'{' expected.") {
            return self.finish_control(ControlKind::Switch, children, pos);
        }
        self.with_context(
            0,
            CONTEXT_FLAG_NO_TRAILING_CLOSURE | CONTEXT_FLAG_IN_TYPE_BODY,
            |p| {
                while !p.is_token(SyntaxKind::CloseBraceToken) && !p.is_at_end() {
                    let before = p.token_pos();
                    match p.token() {
                        SyntaxKind::HashToken if p.look_ahead_is_compilation_directive() => {
                            p.skip_rest_of_line();
                        }
                        SyntaxKind::AtToken => p.skip_attribute(),
                        SyntaxKind::CaseKeyword => children.push(p.parse_switch_case()),
                        SyntaxKind::DefaultKeyword => children.push(p.parse_switch_default()),
                        _ => {
                            p.error_at_current_token("'case' expected.");
                            let stray = p.parse_statement();
                            if stray.is_some() {
                                children.push(stray);
                            }
                        }
                    }
                    if p.token_pos() == before && !p.is_at_end() {
                        p.next_token();
                    }
                }
            },
        );
        self.parse_expected(SyntaxKind::CloseBraceToken, "'}' expected.");
        self.finish_control(ControlKind::Switch, children, pos)
    }

    /// `case pattern, pattern where cond: statements`
    fn parse_switch_case(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        loop {
            children.push(self.parse_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if self.parse_optional(SyntaxKind::WhereKeyword) {
            children.push(self.parse_expression());
        }
        self.parse_expected(SyntaxKind::ColonToken, "':' expected.");
        children.extend(self.parse_case_body());
        self.finish_control(ControlKind::Case, children, pos)
    }

    fn parse_switch_default(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::ColonToken, "':' expected.");
        let children = self.parse_case_body();
        self.finish_control(ControlKind::Default, children, pos)
    }

    fn parse_case_body(&mut self) -> Vec<NodeIndex> {
        self.parse_statements_until(|p| {
            matches!(
                p.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
            ) || (p.is_token(SyntaxKind::AtToken) && p.scanner.source_text()
                [p.token_end() as usize..]
                .starts_with("unknown"))
        })
    }

    /// `do { } catch pattern where cond { } ...`
    fn parse_do_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::ThrowsKeyword) && !self.has_preceding_whitespace() {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
        let mut children = vec![self.parse_block()];
        while self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            let mut catch_children = Vec::new();
            self.with_context(CONTEXT_FLAG_NO_TRAILING_CLOSURE, 0, |p| {
                if !p.is_token(SyntaxKind::OpenBraceToken) {
                    loop {
                        catch_children.push(p.parse_expression());
                        if !p.parse_optional(SyntaxKind::CommaToken) {
                            break;
                        }
                    }
                }
                if p.parse_optional(SyntaxKind::WhereKeyword) {
                    catch_children.push(p.parse_expression());
                }
            });
            catch_children.push(self.parse_block());
            children.push(self.finish_control(ControlKind::Catch, catch_children, catch_pos));
        }
        self.finish_control(ControlKind::Do, children, pos)
    }

    fn parse_return_or_throw(&mut self, kind: ControlKind) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        if self.is_start_of_operand() {
            children.push(self.parse_expression());
        }
        self.finish_control(kind, children, pos)
    }

    fn parse_jump_statement(&mut self, kind: ControlKind) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        if self.is_token(SyntaxKind::Identifier) && !self.has_preceding_line_break() {
            children.push(self.parse_identifier_node());
        }
        self.finish_control(kind, children, pos)
    }

    /// Whether an expression follows on the same line (after `return`).
    fn is_start_of_operand(&self) -> bool {
        !self.has_preceding_line_break()
            && !matches!(
                self.token(),
                SyntaxKind::EndOfFileToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
            )
    }
}
