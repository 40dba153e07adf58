//! Symbol and occurrence records.
//!
//! Kind names and role bits mirror the ones an index store writes, so a
//! dump produced by the build toolchain can be deserialized directly.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    Module,
    Namespace,
    Macro,
    Enum,
    Struct,
    Class,
    Protocol,
    Extension,
    Union,
    TypeAlias,
    Function,
    Variable,
    Field,
    EnumConstant,
    InstanceMethod,
    ClassMethod,
    StaticMethod,
    InstanceProperty,
    ClassProperty,
    StaticProperty,
    Constructor,
    Destructor,
    ConversionFunction,
    Parameter,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SymbolKind {
    /// Kinds that can be the target of a call expression.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            SymbolKind::InstanceMethod
                | SymbolKind::ClassMethod
                | SymbolKind::StaticMethod
                | SymbolKind::Constructor
                | SymbolKind::Function
                | SymbolKind::ConversionFunction
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolLanguage {
    #[default]
    Swift,
    C,
    ObjC,
    Cxx,
}

bitflags! {
    /// Role bits of an occurrence.
    ///
    /// Serialized as a `|`-separated list of flag names, e.g.
    /// `"REFERENCE | CALL"`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SymbolRoles: u32 {
        const DECLARATION = 1 << 0;
        const DEFINITION = 1 << 1;
        const REFERENCE = 1 << 2;
        const READ = 1 << 3;
        const WRITE = 1 << 4;
        const CALL = 1 << 5;
        const DYNAMIC = 1 << 6;
        const ADDRESS_OF = 1 << 7;
        const IMPLICIT = 1 << 8;

        // Relations
        const REL_CHILD_OF = 1 << 9;
        const REL_BASE_OF = 1 << 10;
        const REL_OVERRIDE_OF = 1 << 11;
        const REL_RECEIVED_BY = 1 << 12;
        const REL_CALLED_BY = 1 << 13;
        const REL_EXTENDED_BY = 1 << 14;
        const REL_ACCESSOR_OF = 1 << 15;
        const REL_CONTAINED_BY = 1 << 16;
        const REL_IB_TYPE_OF = 1 << 17;
        const REL_SPECIALIZATION_OF = 1 << 18;
    }
}

/// A declaration known to the index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Demangled linkage name (USR), possibly carrying an `s:` or `c:` prefix.
    #[serde(default)]
    pub linkage_name: String,
    #[serde(default)]
    pub language: SymbolLanguage,
}

/// One mention of a symbol at a source position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub symbol: Symbol,
    pub roles: SymbolRoles,
    /// 1-indexed line
    pub line: u32,
    /// 1-indexed UTF-8 column
    pub column: u32,
    /// The occurrence comes from a system module or SDK
    #[serde(default)]
    pub is_system: bool,
}

impl Occurrence {
    pub fn has_roles(&self, roles: SymbolRoles) -> bool {
        self.roles.contains(roles)
    }
}
