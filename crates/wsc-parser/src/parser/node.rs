//! Syntax node definitions.
//!
//! Every node is an entry in `NodeArena::nodes`: a tagged union (`NodeKind`)
//! plus its byte range and parent. Child links are `NodeIndex` values, with
//! `NodeIndex::NONE` marking an absent optional child.

use smallvec::SmallVec;
use std::sync::Arc;
use wsc_scanner::SyntaxKind;

use super::base::NodeIndex;

/// A node in the syntax arena.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Start byte offset (inclusive)
    pub pos: u32,
    /// End byte offset (exclusive)
    pub end: u32,
    pub parent: NodeIndex,
}

/// Arena holding all nodes of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub(crate) text: Arc<str>,
}

// =============================================================================
// Node kinds
// =============================================================================

#[derive(Clone, Debug)]
pub enum NodeKind {
    SourceFile(BlockData),

    // Declarations
    TypeDecl(TypeDeclData),
    FunctionDecl(FunctionDeclData),
    Parameter(ParameterData),
    VariableDecl(VariableDeclData),
    PatternBinding(PatternBindingData),
    EnumCase(VariableDeclData),
    EnumCaseElement(EnumCaseElementData),
    TypeAlias(TypeAliasData),
    Attribute(AttributeData),

    // Statements
    Block(BlockData),
    Control(ControlData),
    /// `let x` / `var x` pattern, optionally with an initializer (`if let x = y`)
    ValueBinding(ValueBindingData),

    // Expressions
    Identifier(IdentifierData),
    Literal(LiteralData),
    StringLiteral(StringLiteralData),
    MemberAccess(MemberAccessData),
    Postfix(PostfixData),
    Prefix(PrefixData),
    Call(CallData),
    Subscript(SubscriptData),
    Argument(ArgumentData),
    Closure(ClosureData),
    CaptureItem(CaptureItemData),
    Tuple(ListData),
    Collection(ListData),
    DictionaryElement(DictionaryElementData),
    /// Operand/operator sequence of an infix expression, unfolded
    Sequence(ListData),
    Operator(OperatorData),
    /// `? then :` part of a ternary inside a sequence
    Ternary(TernaryData),
    /// `as Type` / `is Type` inside a sequence or pattern
    Cast(CastData),
    GenericSpecialization(GenericSpecializationData),

    // Types
    TypeRef(TypeRefData),
    FunctionType(FunctionTypeData),
    OptionalType(OptionalTypeData),
    AttributedType(AttributedTypeData),
    TupleType(ListData),
    TupleTypeElement(TupleTypeElementData),
    CollectionType(ListData),
    CompositionType(ListData),
    OpaqueType(OpaqueTypeData),

    /// Placeholder for a construct that failed to parse
    Missing,
}

// =============================================================================
// Node data
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct BlockData {
    pub statements: Vec<NodeIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Actor,
    Struct,
    Enum,
    Extension,
    Protocol,
}

impl TypeDeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeDeclKind::Class => "class",
            TypeDeclKind::Actor => "actor",
            TypeDeclKind::Struct => "struct",
            TypeDeclKind::Enum => "enum",
            TypeDeclKind::Extension => "extension",
            TypeDeclKind::Protocol => "protocol",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeDeclData {
    pub kind: TypeDeclKind,
    /// Identifier for nominal types; extended type (`TypeRef`) for extensions
    pub name: NodeIndex,
    pub inheritance: Vec<NodeIndex>,
    pub members: Vec<NodeIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Initializer,
    Deinitializer,
    Subscript,
    Accessor,
}

#[derive(Clone, Debug)]
pub struct FunctionDeclData {
    pub kind: FunctionKind,
    pub name: NodeIndex,
    pub parameters: Vec<NodeIndex>,
    pub result: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    /// Argument label, or the sole name
    pub first_name: NodeIndex,
    /// Local name when distinct from the label
    pub second_name: NodeIndex,
    pub ty: NodeIndex,
    pub default_value: NodeIndex,
}

impl ParameterData {
    /// The name the parameter is bound to inside the body.
    pub fn binding_name(&self) -> NodeIndex {
        if self.second_name.is_some() {
            self.second_name
        } else {
            self.first_name
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VariableDeclData {
    pub elements: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct PatternBindingData {
    pub pattern: NodeIndex,
    pub ty: NodeIndex,
    pub initializer: NodeIndex,
    /// Block of accessor declarations or implicit getter statements
    pub accessors: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct EnumCaseElementData {
    pub name: NodeIndex,
    pub associated_value: NodeIndex,
    pub raw_value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub ty: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AttributeData {
    pub name: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    If,
    Guard,
    While,
    Repeat,
    For,
    Switch,
    Case,
    Default,
    Do,
    Catch,
    Defer,
    Return,
    Throw,
    Break,
    Continue,
    Fallthrough,
}

#[derive(Clone, Debug)]
pub struct ControlData {
    pub kind: ControlKind,
    /// Conditions, patterns, expressions and bodies in source order
    pub children: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ValueBindingData {
    pub pattern: NodeIndex,
    pub ty: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct IdentifierData {
    /// `Identifier`, or the keyword kind for `self`, `super`, `Self`, `init`, ...
    pub token: SyntaxKind,
}

#[derive(Clone, Copy, Debug)]
pub struct LiteralData {
    pub token: SyntaxKind,
}

#[derive(Clone, Debug, Default)]
pub struct StringLiteralData {
    /// Interpolated expressions (`Argument` nodes) in source order
    pub segments: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct MemberAccessData {
    /// `NONE` for an implicit member expression (`.member`)
    pub base: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct PostfixData {
    pub operand: NodeIndex,
    /// `ExclamationToken`, `QuestionToken` or `OperatorToken`
    pub operator: SyntaxKind,
}

#[derive(Clone, Copy, Debug)]
pub struct PrefixData {
    /// Operator token kind, or `TryKeyword` / `AwaitKeyword` / `BackslashToken`
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    /// `Argument` nodes inside the parentheses
    pub arguments: Vec<NodeIndex>,
    /// Unlabeled trailing closure, or `NONE`
    pub trailing_closure: NodeIndex,
    /// Labeled trailing closures following the first one (`Argument` nodes)
    pub additional_trailing_closures: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct SubscriptData {
    pub base: NodeIndex,
    pub arguments: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ArgumentData {
    pub label: NodeIndex,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub enum ClosureParameters {
    #[default]
    None,
    /// `a, b in`: identifier nodes
    Shorthand(Vec<NodeIndex>),
    /// `(a: Int, b) in`: parameter nodes
    Parameters(Vec<NodeIndex>),
}

impl ClosureParameters {
    pub fn nodes(&self) -> &[NodeIndex] {
        match self {
            ClosureParameters::None => &[],
            ClosureParameters::Shorthand(nodes) | ClosureParameters::Parameters(nodes) => nodes,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClosureData {
    pub captures: Vec<NodeIndex>,
    pub parameters: ClosureParameters,
    pub result: NodeIndex,
    pub statements: Vec<NodeIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureSpecifier {
    None,
    Weak,
    Unowned,
}

#[derive(Clone, Debug)]
pub struct CaptureItemData {
    pub specifier: CaptureSpecifier,
    /// Explicit binding name in `name = expression`, or `NONE`
    pub name: NodeIndex,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ListData {
    pub elements: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct DictionaryElementData {
    pub key: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct OperatorData {
    pub token: SyntaxKind,
}

#[derive(Clone, Debug)]
pub struct TernaryData {
    pub then_expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CastData {
    /// `AsKeyword` or `IsKeyword`
    pub keyword: SyntaxKind,
    pub ty: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct GenericSpecializationData {
    pub base: NodeIndex,
    pub arguments: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct TypeRefData {
    /// Qualifying type for member types (`Outer.Inner`), or `NONE`
    pub base: NodeIndex,
    pub name: NodeIndex,
    pub generic_arguments: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct FunctionTypeData {
    /// `TupleTypeElement` nodes
    pub parameters: Vec<NodeIndex>,
    pub result: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct OptionalTypeData {
    pub wrapped: NodeIndex,
    /// `T!` rather than `T?`
    pub implicitly_unwrapped: bool,
}

#[derive(Clone, Debug)]
pub struct AttributedTypeData {
    /// `Attribute` nodes (`@escaping`, `@Sendable`, ...)
    pub attributes: Vec<NodeIndex>,
    /// `inout`, `borrowing`, `consuming`, ... as an identifier node, or `NONE`
    pub specifier: NodeIndex,
    pub base: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TupleTypeElementData {
    pub first_name: NodeIndex,
    pub second_name: NodeIndex,
    pub ty: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct OpaqueTypeData {
    /// `any` rather than `some`
    pub existential: bool,
    pub base: NodeIndex,
}

// =============================================================================
// Child enumeration
// =============================================================================

impl NodeKind {
    /// Child links in source order, `NONE` entries omitted.
    pub fn children(&self) -> SmallVec<[NodeIndex; 8]> {
        let mut out: SmallVec<[NodeIndex; 8]> = SmallVec::new();
        let mut push = |index: NodeIndex| {
            if index.is_some() {
                out.push(index);
            }
        };
        match self {
            NodeKind::SourceFile(data) | NodeKind::Block(data) => {
                data.statements.iter().copied().for_each(&mut push);
            }
            NodeKind::TypeDecl(data) => {
                push(data.name);
                data.inheritance.iter().copied().for_each(&mut push);
                data.members.iter().copied().for_each(&mut push);
            }
            NodeKind::FunctionDecl(data) => {
                push(data.name);
                data.parameters.iter().copied().for_each(&mut push);
                push(data.result);
                push(data.body);
            }
            NodeKind::Parameter(data) => {
                push(data.first_name);
                push(data.second_name);
                push(data.ty);
                push(data.default_value);
            }
            NodeKind::VariableDecl(data) | NodeKind::EnumCase(data) => {
                data.elements.iter().copied().for_each(&mut push);
            }
            NodeKind::PatternBinding(data) => {
                push(data.pattern);
                push(data.ty);
                push(data.initializer);
                push(data.accessors);
            }
            NodeKind::EnumCaseElement(data) => {
                push(data.name);
                push(data.associated_value);
                push(data.raw_value);
            }
            NodeKind::TypeAlias(data) => {
                push(data.name);
                push(data.ty);
            }
            NodeKind::Attribute(data) => push(data.name),
            NodeKind::Control(data) => data.children.iter().copied().for_each(&mut push),
            NodeKind::ValueBinding(data) => {
                push(data.pattern);
                push(data.ty);
                push(data.initializer);
            }
            NodeKind::StringLiteral(data) => data.segments.iter().copied().for_each(&mut push),
            NodeKind::MemberAccess(data) => {
                push(data.base);
                push(data.name);
            }
            NodeKind::Postfix(data) => push(data.operand),
            NodeKind::Prefix(data) => push(data.operand),
            NodeKind::Call(data) => {
                push(data.callee);
                data.arguments.iter().copied().for_each(&mut push);
                push(data.trailing_closure);
                data.additional_trailing_closures
                    .iter()
                    .copied()
                    .for_each(&mut push);
            }
            NodeKind::Subscript(data) => {
                push(data.base);
                data.arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::Argument(data) => {
                push(data.label);
                push(data.expression);
            }
            NodeKind::Closure(data) => {
                data.captures.iter().copied().for_each(&mut push);
                data.parameters.nodes().iter().copied().for_each(&mut push);
                push(data.result);
                data.statements.iter().copied().for_each(&mut push);
            }
            NodeKind::CaptureItem(data) => {
                push(data.name);
                push(data.expression);
            }
            NodeKind::Tuple(data)
            | NodeKind::Collection(data)
            | NodeKind::Sequence(data)
            | NodeKind::TupleType(data)
            | NodeKind::CollectionType(data)
            | NodeKind::CompositionType(data) => {
                data.elements.iter().copied().for_each(&mut push);
            }
            NodeKind::DictionaryElement(data) => {
                push(data.key);
                push(data.value);
            }
            NodeKind::Ternary(data) => push(data.then_expression),
            NodeKind::Cast(data) => push(data.ty),
            NodeKind::GenericSpecialization(data) => {
                push(data.base);
                data.arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::TypeRef(data) => {
                push(data.base);
                push(data.name);
                data.generic_arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::FunctionType(data) => {
                data.parameters.iter().copied().for_each(&mut push);
                push(data.result);
            }
            NodeKind::OptionalType(data) => push(data.wrapped),
            NodeKind::AttributedType(data) => {
                data.attributes.iter().copied().for_each(&mut push);
                push(data.specifier);
                push(data.base);
            }
            NodeKind::TupleTypeElement(data) => {
                push(data.first_name);
                push(data.second_name);
                push(data.ty);
            }
            NodeKind::OpaqueType(data) => push(data.base),
            NodeKind::Identifier(_)
            | NodeKind::Literal(_)
            | NodeKind::Operator(_)
            | NodeKind::Missing => {}
        }
        out
    }

    /// Short name of the node kind, for diagnostics and logging.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::SourceFile(_) => "SourceFile",
            NodeKind::TypeDecl(_) => "TypeDecl",
            NodeKind::FunctionDecl(_) => "FunctionDecl",
            NodeKind::Parameter(_) => "Parameter",
            NodeKind::VariableDecl(_) => "VariableDecl",
            NodeKind::PatternBinding(_) => "PatternBinding",
            NodeKind::EnumCase(_) => "EnumCase",
            NodeKind::EnumCaseElement(_) => "EnumCaseElement",
            NodeKind::TypeAlias(_) => "TypeAlias",
            NodeKind::Attribute(_) => "Attribute",
            NodeKind::Block(_) => "Block",
            NodeKind::Control(_) => "Control",
            NodeKind::ValueBinding(_) => "ValueBinding",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::StringLiteral(_) => "StringLiteral",
            NodeKind::MemberAccess(_) => "MemberAccess",
            NodeKind::Postfix(_) => "Postfix",
            NodeKind::Prefix(_) => "Prefix",
            NodeKind::Call(_) => "Call",
            NodeKind::Subscript(_) => "Subscript",
            NodeKind::Argument(_) => "Argument",
            NodeKind::Closure(_) => "Closure",
            NodeKind::CaptureItem(_) => "CaptureItem",
            NodeKind::Tuple(_) => "Tuple",
            NodeKind::Collection(_) => "Collection",
            NodeKind::DictionaryElement(_) => "DictionaryElement",
            NodeKind::Sequence(_) => "Sequence",
            NodeKind::Operator(_) => "Operator",
            NodeKind::Ternary(_) => "Ternary",
            NodeKind::Cast(_) => "Cast",
            NodeKind::GenericSpecialization(_) => "GenericSpecialization",
            NodeKind::TypeRef(_) => "TypeRef",
            NodeKind::FunctionType(_) => "FunctionType",
            NodeKind::OptionalType(_) => "OptionalType",
            NodeKind::AttributedType(_) => "AttributedType",
            NodeKind::TupleType(_) => "TupleType",
            NodeKind::TupleTypeElement(_) => "TupleTypeElement",
            NodeKind::CollectionType(_) => "CollectionType",
            NodeKind::CompositionType(_) => "CompositionType",
            NodeKind::OpaqueType(_) => "OpaqueType",
            NodeKind::Missing => "Missing",
        }
    }
}
