//! IR type references and declaration modifiers.
//!
//! Types here are *references* as the front end resolved them; converting a
//! reference to C# type text is the type-mapping service's job
//! (see [`crate::mapping::TypeMapper`]).

/// Kotlin primitive kinds with a direct CLR counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    /// A class/interface/object type, possibly generic.
    Class {
        package: Vec<String>,
        name: String,
        arguments: Vec<IrType>,
    },
    Primitive(PrimitiveType),
    /// `kotlin.Unit` (maps to `void` in return position).
    Unit,
    /// `kotlin.Nothing` — the bottom type of functions that never return.
    Nothing,
}

impl IrType {
    pub fn class(package: &[&str], name: impl Into<String>) -> Self {
        IrType::Class {
            package: package.iter().map(|s| s.to_string()).collect(),
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn generic(package: &[&str], name: impl Into<String>, arguments: Vec<IrType>) -> Self {
        IrType::Class {
            package: package.iter().map(|s| s.to_string()).collect(),
            name: name.into(),
            arguments,
        }
    }

    pub fn string() -> Self {
        IrType::class(&["kotlin"], "String")
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, IrType::Nothing)
    }

    /// The single generic argument, if this is a class type with exactly one.
    /// Used by the iterator-protocol translation.
    pub fn single_argument(&self) -> Option<&IrType> {
        match self {
            IrType::Class { arguments, .. } if arguments.len() == 1 => arguments.first(),
            _ => None,
        }
    }
}

/// Declaration visibility. The four values map one-to-one onto C# visibility
/// keywords; the enum being closed makes the mapping total by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Private,
    Protected,
    Internal,
    #[default]
    Public,
}

impl Visibility {
    pub fn cs_keyword(&self) -> &'static str {
        match self {
            Visibility::Private => "private ",
            Visibility::Protected => "protected ",
            Visibility::Internal => "internal ",
            Visibility::Public => "public ",
        }
    }
}

/// Declaration modality.
///
/// `Sealed` (Kotlin sealed hierarchies) is recognized but has no agreed C#
/// mapping yet; the generator emits a placeholder for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

/// Class declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    EnumEntry,
    Annotation,
    Object,
    /// Synthesized per-file container for file-scope declarations.
    FileClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_cs_keyword() {
        assert_eq!(Visibility::Private.cs_keyword(), "private ");
        assert_eq!(Visibility::Protected.cs_keyword(), "protected ");
        assert_eq!(Visibility::Internal.cs_keyword(), "internal ");
        assert_eq!(Visibility::Public.cs_keyword(), "public ");
    }

    #[test]
    fn test_visibility_mapping_is_a_bijection() {
        let all = [
            Visibility::Private,
            Visibility::Protected,
            Visibility::Internal,
            Visibility::Public,
        ];
        let mut keywords: Vec<&str> = all.iter().map(|v| v.cs_keyword()).collect();
        keywords.sort_unstable();
        keywords.dedup();
        assert_eq!(keywords.len(), all.len());
    }

    #[test]
    fn test_single_argument() {
        let list = IrType::generic(&["kotlin", "collections"], "List", vec![IrType::string()]);
        assert_eq!(list.single_argument(), Some(&IrType::string()));
        assert_eq!(IrType::string().single_argument(), None);
        assert_eq!(IrType::Primitive(PrimitiveType::Int).single_argument(), None);
    }
}
