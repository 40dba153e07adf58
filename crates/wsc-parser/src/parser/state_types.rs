//! Parser state - type parsing methods

use wsc_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::{
    AttributeData, AttributedTypeData, FunctionTypeData, ListData, NodeKind, OpaqueTypeData,
    OptionalTypeData, TupleTypeElementData, TypeRefData,
};
use super::state::ParserState;

/// Ownership and isolation specifiers written before a parameter type.
const TYPE_SPECIFIERS: &[&str] = &[
    "borrowing",
    "consuming",
    "__owned",
    "__shared",
    "sending",
    "isolated",
];

impl ParserState {
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node("Type expected.");
        }
        let ty = self.parse_attributed_type();
        self.exit_recursion();
        ty
    }

    /// Whether the current token can begin a type.
    pub(crate) fn is_start_of_type(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::SelfTypeKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::AtToken
                | SyntaxKind::InoutKeyword
        )
    }

    /// `@escaping @Sendable inout T`
    fn parse_attributed_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut attributes = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            attributes.push(self.parse_attribute());
        }
        let specifier = if self.is_token(SyntaxKind::InoutKeyword) || self.is_type_specifier() {
            self.parse_identifier_node()
        } else {
            NodeIndex::NONE
        };
        let base = self.parse_composition_type();
        if attributes.is_empty() && specifier.is_none() {
            return base;
        }
        self.finish_node(
            NodeKind::AttributedType(AttributedTypeData {
                attributes,
                specifier,
                base,
            }),
            pos,
        )
    }

    fn is_type_specifier(&mut self) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && TYPE_SPECIFIERS.contains(&self.token_text())
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_type() && !p.has_preceding_line_break()
            })
    }

    /// `@name` or `@name(arguments)`; arguments are skipped.
    pub(crate) fn parse_attribute(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token(); // `@`
        let name = if self.is_identifier_or_keyword() {
            self.parse_identifier_node()
        } else {
            self.missing_node("Attribute name expected.")
        };
        if self.is_token(SyntaxKind::OpenParenToken) && !self.has_preceding_whitespace() {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
        self.finish_node(NodeKind::Attribute(AttributeData { name }), pos)
    }

    /// `A & B & C`
    fn parse_composition_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let first = self.parse_postfix_type();
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }
        let mut elements = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            elements.push(self.parse_postfix_type());
        }
        self.finish_node(NodeKind::CompositionType(ListData { elements }), pos)
    }

    /// Primary type followed by `?`, `!` and `.Member` suffixes.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut ty = self.parse_primary_type();
        loop {
            match self.token() {
                SyntaxKind::QuestionToken | SyntaxKind::ExclamationToken
                    if !self.has_preceding_whitespace() =>
                {
                    let implicitly_unwrapped = self.is_token(SyntaxKind::ExclamationToken);
                    self.next_token();
                    ty = self.finish_node(
                        NodeKind::OptionalType(OptionalTypeData {
                            wrapped: ty,
                            implicitly_unwrapped,
                        }),
                        pos,
                    );
                }
                SyntaxKind::DotToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    if !self.is_identifier_or_keyword() {
                        self.error_at_current_token("Identifier expected.");
                        break;
                    }
                    let name = self.parse_identifier_node();
                    let generic_arguments = self.parse_generic_argument_clause();
                    ty = self.finish_node(
                        NodeKind::TypeRef(TypeRefData {
                            base: ty,
                            name,
                            generic_arguments,
                        }),
                        pos,
                    );
                }
                _ => break,
            }
        }
        ty
    }

    fn parse_primary_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier if self.is_opaque_type_keyword() => {
                let existential = self.is_contextual("any");
                self.next_token();
                let base = self.parse_composition_type();
                self.finish_node(NodeKind::OpaqueType(OpaqueTypeData { existential, base }), pos)
            }
            SyntaxKind::Identifier | SyntaxKind::SelfTypeKeyword => {
                let name = self.parse_identifier_node();
                let generic_arguments = self.parse_generic_argument_clause();
                self.finish_node(
                    NodeKind::TypeRef(TypeRefData {
                        base: NodeIndex::NONE,
                        name,
                        generic_arguments,
                    }),
                    pos,
                )
            }
            SyntaxKind::OpenParenToken => self.parse_tuple_or_function_type(),
            SyntaxKind::OpenBracketToken => self.parse_collection_type(),
            _ => self.missing_node("Type expected."),
        }
    }

    /// `some P` / `any P`, as opposed to a type named `some` or `any`.
    fn is_opaque_type_keyword(&mut self) -> bool {
        (self.is_contextual("some") || self.is_contextual("any"))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_type() && !p.has_preceding_line_break()
            })
    }

    /// `<T, U>` after a type name; empty when absent.
    fn parse_generic_argument_clause(&mut self) -> Vec<NodeIndex> {
        let mut arguments = Vec::new();
        if !self.is_token(SyntaxKind::LessThanToken) || self.has_preceding_line_break() {
            return arguments;
        }
        self.next_token();
        while !self.is_token(SyntaxKind::GreaterThanToken) && !self.is_at_end() {
            arguments.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken, "'>' expected.");
        arguments
    }

    /// `(A, B)` or `(A, B) async throws -> R`
    fn parse_tuple_or_function_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let elements = self.parse_tuple_type_elements();
        let has_effects = self.skip_effect_specifiers();
        if self.parse_optional(SyntaxKind::ArrowToken) {
            let result = self.parse_type();
            return self.finish_node(
                NodeKind::FunctionType(FunctionTypeData {
                    parameters: elements,
                    result,
                }),
                pos,
            );
        }
        if has_effects {
            self.error_at_current_token("'->' expected.");
            return self.finish_node(
                NodeKind::FunctionType(FunctionTypeData {
                    parameters: elements,
                    result: NodeIndex::NONE,
                }),
                pos,
            );
        }
        self.finish_node(NodeKind::TupleType(ListData { elements }), pos)
    }

    /// Tuple type, also used for enum associated values.
    pub(crate) fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let elements = self.parse_tuple_type_elements();
        self.finish_node(NodeKind::TupleType(ListData { elements }), pos)
    }

    fn parse_tuple_type_elements(&mut self) -> Vec<NodeIndex> {
        self.next_token(); // `(`
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) && !self.is_at_end() {
            elements.push(self.parse_tuple_type_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.is_token(SyntaxKind::CloseParenToken) {
            self.error_at_current_token("')' expected.");
            self.skip_to_closer(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
        self.parse_optional(SyntaxKind::CloseParenToken);
        elements
    }

    /// `T`, `label: T` or `_ name: T`
    fn parse_tuple_type_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let (first_name, second_name) = if self.look_ahead_is_tuple_element_label() {
            let first_name = self.parse_identifier_node();
            let second_name = if self.is_token(SyntaxKind::ColonToken) {
                NodeIndex::NONE
            } else {
                self.parse_identifier_node()
            };
            self.next_token(); // `:`
            (first_name, second_name)
        } else {
            (NodeIndex::NONE, NodeIndex::NONE)
        };
        let ty = self.parse_type();
        self.skip_variadic_marker();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            // Default value of an enum associated value.
            self.parse_expression();
        }
        self.finish_node(
            NodeKind::TupleTypeElement(TupleTypeElementData {
                first_name,
                second_name,
                ty,
            }),
            pos,
        )
    }

    fn look_ahead_is_tuple_element_label(&mut self) -> bool {
        if !self.is_identifier_or_keyword() {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::ColonToken) {
                return true;
            }
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    /// `[T]` or `[K: V]`
    fn parse_collection_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token(); // `[`
        let mut elements = vec![self.parse_type()];
        if self.parse_optional(SyntaxKind::ColonToken) {
            elements.push(self.parse_type());
        }
        self.parse_expected(SyntaxKind::CloseBracketToken, "']' expected.");
        self.finish_node(NodeKind::CollectionType(ListData { elements }), pos)
    }
}
