//! IR declaration definitions.

use super::expr::IrExpr;
use super::name::Name;
use super::stmt::IrStmt;
use super::types::{ClassKind, IrType, Modality, Visibility};

/// A whole compilation module: the unit the host driver hands to the backend.
#[derive(Debug, Clone)]
pub struct IrModuleFragment {
    pub name: String,
    pub files: Vec<IrFile>,
}

/// One input file. Produces exactly one rendered C# unit.
#[derive(Debug, Clone)]
pub struct IrFile {
    /// File stem (e.g. `main` for `main.kt`). Names the synthesized
    /// file-container class.
    pub name: String,
    /// Package path; empty means the root package (no `namespace` wrapper).
    pub package: Vec<String>,
    pub declarations: Vec<IrDecl>,
}

impl IrFile {
    pub fn new(name: impl Into<String>, package: &[&str]) -> Self {
        Self {
            name: name.into(),
            package: package.iter().map(|s| s.to_string()).collect(),
            declarations: Vec::new(),
        }
    }
}

/// Declaration kinds.
#[derive(Debug, Clone)]
pub enum IrDecl {
    Class(IrClass),
    Function(IrFunction),
    Constructor(IrConstructor),
    Property(IrProperty),
    Variable(IrVariable),
    TypeParameter(IrTypeParameter),
}

impl IrDecl {
    /// Whether this declaration exists only to satisfy the front end's
    /// expect/actual contract and must not be emitted.
    pub fn is_expect(&self) -> bool {
        match self {
            IrDecl::Class(c) => c.is_expect,
            IrDecl::Function(f) => f.is_expect,
            IrDecl::Property(p) => p.is_expect,
            IrDecl::Constructor(_) | IrDecl::Variable(_) | IrDecl::TypeParameter(_) => false,
        }
    }

    /// Whether this is a fake override (present only for interface
    /// conformance); fake overrides are never emitted.
    pub fn is_fake_override(&self) -> bool {
        match self {
            IrDecl::Function(f) => f.is_fake_override,
            IrDecl::Property(p) => p.is_fake_override,
            _ => false,
        }
    }
}

/// A lightweight reference to a class declaration, enough to name it from a
/// call site (fully qualified construction, static member access).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub package: Vec<String>,
    pub name: String,
    /// Enclosing class, for members of companion-like helper types.
    pub outer: Option<Box<ClassRef>>,
}

impl ClassRef {
    pub fn new(package: &[&str], name: impl Into<String>) -> Self {
        Self {
            package: package.iter().map(|s| s.to_string()).collect(),
            name: name.into(),
            outer: None,
        }
    }

    pub fn with_outer(mut self, outer: ClassRef) -> Self {
        self.outer = Some(Box::new(outer));
        self
    }

    /// The default (non-parameterized) type of the referenced class.
    pub fn default_type(&self) -> IrType {
        IrType::Class {
            package: self.package.clone(),
            name: self.name.clone(),
            arguments: Vec::new(),
        }
    }
}

/// IR class-like declaration (class, interface, enum, annotation, object,
/// synthesized file container).
#[derive(Debug, Clone)]
pub struct IrClass {
    pub kind: ClassKind,
    pub name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    /// Package of the enclosing file, for fully qualified naming.
    pub package: Vec<String>,
    pub super_types: Vec<IrType>,
    pub declarations: Vec<IrDecl>,
    pub is_expect: bool,
}

impl IrClass {
    pub fn new(kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Name::ident(name),
            visibility: Visibility::Public,
            modality: Modality::Final,
            package: Vec::new(),
            super_types: Vec::new(),
            declarations: Vec::new(),
            is_expect: false,
        }
    }

    pub fn default_type(&self) -> IrType {
        IrType::Class {
            package: self.package.clone(),
            name: self.name.describe(),
            arguments: Vec::new(),
        }
    }

    pub fn class_ref(&self) -> ClassRef {
        ClassRef {
            package: self.package.clone(),
            name: self.name.describe(),
            outer: None,
        }
    }

    pub fn constructors(&self) -> impl Iterator<Item = &IrConstructor> {
        self.declarations.iter().filter_map(|d| match d {
            IrDecl::Constructor(c) => Some(c),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &IrProperty> {
        self.declarations.iter().filter_map(|d| match d {
            IrDecl::Property(p) => Some(p),
            _ => None,
        })
    }
}

/// IR function definition.
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    pub is_static: bool,
    /// Marked with the CLR companion-static attribute: an implicitly static
    /// member addressed through the enclosing type's *outer* class.
    pub is_clr_static: bool,
    pub is_operator: bool,
    pub is_expect: bool,
    pub is_fake_override: bool,
    /// Extension receiver, rendered as a leading `receiver` parameter.
    pub extension_receiver: Option<IrParameter>,
    pub parameters: Vec<IrParameter>,
    pub return_type: IrType,
    pub body: Option<IrBody>,
}

impl IrFunction {
    pub fn new(name: impl Into<String>, return_type: IrType) -> Self {
        Self {
            name: Name::ident(name),
            visibility: Visibility::Public,
            modality: Modality::Final,
            is_static: false,
            is_clr_static: false,
            is_operator: false,
            is_expect: false,
            is_fake_override: false,
            extension_receiver: None,
            parameters: Vec::new(),
            return_type,
            body: None,
        }
    }
}

/// Function or constructor parameter.
#[derive(Debug, Clone)]
pub struct IrParameter {
    pub name: Name,
    pub ty: IrType,
}

impl IrParameter {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: Name::ident(name),
            ty,
        }
    }
}

/// An executable body.
#[derive(Debug, Clone, Default)]
pub struct IrBody {
    pub statements: Vec<IrStmt>,
}

impl IrBody {
    pub fn new(statements: Vec<IrStmt>) -> Self {
        Self { statements }
    }
}

/// IR constructor definition. Named after the enclosing class at generation
/// time; a delegating call as the first body statement becomes the
/// `: base(...)` header suffix.
#[derive(Debug, Clone)]
pub struct IrConstructor {
    pub visibility: Visibility,
    pub extension_receiver: Option<IrParameter>,
    pub parameters: Vec<IrParameter>,
    pub body: Option<IrBody>,
}

impl IrConstructor {
    pub fn trivial() -> Self {
        Self {
            visibility: Visibility::Public,
            extension_receiver: None,
            parameters: Vec::new(),
            body: None,
        }
    }
}

/// One property accessor as declared by the front end.
#[derive(Debug, Clone)]
pub struct IrAccessor {
    /// The property type as seen by this accessor.
    pub ty: IrType,
    pub is_static: bool,
}

/// IR property definition. Emitted as a single C# accessor declaration whose
/// `get;`/`set;` set mirrors which accessors the IR declares.
#[derive(Debug, Clone)]
pub struct IrProperty {
    pub name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    pub is_static: bool,
    pub getter: Option<IrAccessor>,
    pub setter: Option<IrAccessor>,
    /// Backing-field initializer; moved into constructors at generation time
    /// because C# field initializers cannot reference the receiver.
    pub initializer: Option<IrExpr>,
    pub is_expect: bool,
    pub is_fake_override: bool,
}

impl IrProperty {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: Name::ident(name),
            visibility: Visibility::Public,
            modality: Modality::Final,
            is_static: false,
            getter: Some(IrAccessor {
                ty,
                is_static: false,
            }),
            setter: None,
            initializer: None,
            is_expect: false,
            is_fake_override: false,
        }
    }

    /// The declared property type: getter's view first, setter's otherwise.
    pub fn declared_type(&self) -> Option<&IrType> {
        self.getter
            .as_ref()
            .map(|g| &g.ty)
            .or_else(|| self.setter.as_ref().map(|s| &s.ty))
    }
}

/// Local variable declaration.
#[derive(Debug, Clone)]
pub struct IrVariable {
    pub name: Name,
    pub ty: IrType,
    pub initializer: Option<IrExpr>,
}

/// Type parameter declaration.
#[derive(Debug, Clone)]
pub struct IrTypeParameter {
    pub name: Name,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::types::ClassKind;

    #[test]
    fn test_declared_type_prefers_getter() {
        let mut p = IrProperty::new("x", IrType::string());
        p.setter = Some(IrAccessor {
            ty: IrType::Unit,
            is_static: false,
        });
        assert_eq!(p.declared_type(), Some(&IrType::string()));

        p.getter = None;
        assert_eq!(p.declared_type(), Some(&IrType::Unit));

        p.setter = None;
        assert_eq!(p.declared_type(), None);
    }

    #[test]
    fn test_class_ref_default_type() {
        let mut class = IrClass::new(ClassKind::Class, "User");
        class.package = vec!["app".to_string()];
        assert_eq!(class.default_type(), IrType::class(&["app"], "User"));
        assert_eq!(class.class_ref().default_type(), class.default_type());
    }
}
