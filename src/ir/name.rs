//! IR names, including compiler-synthesized "special" names.
//!
//! The front end synthesizes names that are not user-visible (the implicit
//! receiver, the desugared loop iterator, property accessor functions). They
//! are modeled as a tagged [`SpecialName`] variant instead of the string
//! sentinels (`<this>`, `<get-x>`, ...) the front end uses internally, so no
//! code in this crate parses name prefixes.

use kclr_core::csharp_keywords;

/// Whether an accessor function reads or writes its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
}

/// A compiler-synthesized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialName {
    /// The implicit dispatch receiver (`<this>`).
    This,
    /// The desugared loop iterator variable (`<iterator>`).
    IteratorVar,
    /// A property accessor function (`<get-x>` / `<set-x>`), carrying the
    /// property name it accesses.
    Accessor(AccessorKind, String),
    /// Any other synthesized name. There is no translation rule for these;
    /// the generator emits a placeholder instead of guessing.
    Unknown(String),
}

/// A declaration or value name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Name {
    /// An ordinary, user-written identifier.
    Ident(String),
    /// A synthesized name requiring mangling rules.
    Special(SpecialName),
}

impl Name {
    pub fn ident(name: impl Into<String>) -> Self {
        Name::Ident(name.into())
    }

    pub fn getter(property: impl Into<String>) -> Self {
        Name::Special(SpecialName::Accessor(AccessorKind::Get, property.into()))
    }

    pub fn setter(property: impl Into<String>) -> Self {
        Name::Special(SpecialName::Accessor(AccessorKind::Set, property.into()))
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Name::Special(_))
    }

    /// Map this name to C# text.
    ///
    /// Ordinary identifiers are escaped against the C# keyword list. Special
    /// names map through a finite lookup; `None` means the name has no
    /// translation and the caller must emit a placeholder.
    pub fn mangled(&self) -> Option<String> {
        match self {
            Name::Ident(name) => Some(csharp_keywords::escape_identifier(name)),
            Name::Special(SpecialName::This) => Some("this".to_string()),
            Name::Special(SpecialName::IteratorVar) => Some("iterator".to_string()),
            Name::Special(SpecialName::Accessor(..)) => None,
            Name::Special(SpecialName::Unknown(_)) => None,
        }
    }

    /// Render the raw spelling for diagnostics (placeholder comments).
    pub fn describe(&self) -> String {
        match self {
            Name::Ident(name) => name.clone(),
            Name::Special(SpecialName::This) => "<this>".to_string(),
            Name::Special(SpecialName::IteratorVar) => "<iterator>".to_string(),
            Name::Special(SpecialName::Accessor(AccessorKind::Get, p)) => format!("<get-{}>", p),
            Name::Special(SpecialName::Accessor(AccessorKind::Set, p)) => format!("<set-{}>", p),
            Name::Special(SpecialName::Unknown(raw)) => raw.clone(),
        }
    }
}
