//! Declaration generation: files, classes and their members.
//!
//! Each declaration kind gets a `Line` header (visibility, static keyword,
//! modality, name, supertype list) followed by a `Block` of member documents.
//! Fake overrides are skipped outright; shapes with no translation rule
//! degrade to placeholders.

use kclr_core::clr;

use crate::ir::{
    ClassKind, IrBody, IrClass, IrConstructor, IrDecl, IrExprKind, IrFile, IrFunction, IrProperty, IrStmt, IrVariable,
    Modality, Name,
};

use super::node::{CodeNode, block, fragment, join, line, lines, stmt_block, unsupported};
use super::{CsEmitter, EmitError};

impl CsEmitter<'_> {
    /// Generate the layout document for one file: its class declarations,
    /// wrapped in a `namespace` block when the package is non-root.
    #[tracing::instrument(skip_all, fields(file = %file.name, decl_count = file.declarations.len()))]
    pub fn emit_file(&self, file: &IrFile) -> Result<CodeNode, EmitError> {
        let mut members = Vec::new();
        for decl in &file.declarations {
            match decl {
                IrDecl::Class(class) => members.push(self.emit_class(class)?),
                other => members.push(unsupported(
                    format!("declaration at file scope: {}", decl_kind_name(other)),
                    "emit_file",
                    vec![format!("in file {}", file.name)],
                )),
            }
        }

        let content = if members.len() == 1 {
            members.remove(0)
        } else {
            lines(members)
        };

        if file.package.is_empty() {
            Ok(content)
        } else {
            Ok(lines(vec![
                fragment(format!("namespace {}", file.package.join("."))),
                block(vec![content]),
            ]))
        }
    }

    fn emit_class(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        match class.kind {
            ClassKind::FileClass => self.emit_file_class(class),
            ClassKind::Class => self.emit_plain_class(class),
            ClassKind::Interface => self.emit_interface(class),
            ClassKind::Enum => self.emit_enum(class),
            ClassKind::EnumEntry => Ok(unsupported(
                "class kind: enum entry",
                "emit_class",
                vec![class.name.describe()],
            )),
            ClassKind::Annotation => self.emit_annotation_class(class),
            ClassKind::Object => self.emit_object(class),
        }
    }

    fn emit_file_class(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        Ok(lines(vec![
            fragment(clr::FILE_CLASS_ATTRIBUTE),
            line(vec![
                fragment(class.visibility.cs_keyword()),
                fragment("static "),
                fragment("class "),
                self.emit_decl_name(&class.name),
            ]),
            block(self.emit_members(class)?),
        ]))
    }

    fn emit_plain_class(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        let mut header = vec![
            fragment(class.visibility.cs_keyword()),
            self.class_modality(class),
            fragment("class "),
            self.emit_decl_name(&class.name),
        ];
        header.extend(self.supertype_suffix(class));
        Ok(lines(vec![line(header), block(self.emit_members(class)?)]))
    }

    fn emit_interface(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        let mut header = vec![
            fragment(class.visibility.cs_keyword()),
            self.class_modality(class),
            fragment("interface "),
            self.emit_decl_name(&class.name),
        ];
        header.extend(self.supertype_suffix(class));
        Ok(lines(vec![line(header), block(self.emit_members(class)?)]))
    }

    fn emit_enum(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        let header = vec![
            fragment(class.visibility.cs_keyword()),
            self.class_modality(class),
            fragment("enum "),
            self.emit_decl_name(&class.name),
        ];
        Ok(lines(vec![line(header), block(self.emit_members(class)?)]))
    }

    fn emit_annotation_class(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        let header = vec![
            fragment(class.visibility.cs_keyword()),
            self.class_modality(class),
            fragment("class "),
            self.emit_decl_name(&class.name),
            fragment(format!(" : {}", clr::ATTRIBUTE_BASE)),
        ];
        Ok(lines(vec![line(header), block(self.emit_members(class)?)]))
    }

    /// Singleton objects additionally get a lazily-constructed static
    /// `INSTANCE` accessor ahead of their other members.
    fn emit_object(&self, class: &IrClass) -> Result<CodeNode, EmitError> {
        let ty = self.types.map_type(&class.default_type());
        let mut header = vec![
            fragment(class.visibility.cs_keyword()),
            self.class_modality(class),
            fragment("class "),
            self.emit_decl_name(&class.name),
        ];
        header.extend(self.supertype_suffix(class));

        let mut members = vec![fragment(format!(
            "public static {} INSTANCE {{ get; }} = new {}();",
            ty, ty
        ))];
        members.extend(self.emit_members(class)?);
        Ok(lines(vec![line(header), block(members)]))
    }

    fn emit_members(&self, class: &IrClass) -> Result<Vec<CodeNode>, EmitError> {
        let mut members = Vec::new();
        for decl in &class.declarations {
            if decl.is_fake_override() {
                continue;
            }
            match decl {
                IrDecl::Class(nested) => members.push(self.emit_class(nested)?),
                IrDecl::Function(function) => members.push(self.emit_function(function)),
                IrDecl::Constructor(ctor) => members.push(self.emit_constructor(class, ctor)),
                IrDecl::Property(property) => members.push(self.emit_property(property)?),
                IrDecl::Variable(variable) => {
                    members.push(self.emit_variable(variable).append_line(vec![fragment(";")]));
                }
                IrDecl::TypeParameter(tp) => members.push(unsupported(
                    "declaration: type parameter",
                    "emit_members",
                    vec![tp.name.describe(), format!("in class {}", class.name.describe())],
                )),
            }
        }
        Ok(members)
    }

    pub(crate) fn emit_function(&self, function: &IrFunction) -> CodeNode {
        let Some(name) = function.name.mangled() else {
            return unsupported(
                format!("function name: {}", function.name.describe()),
                "emit_function",
                vec![],
            );
        };

        let mut doc = Vec::new();
        if function.return_type.is_nothing() {
            doc.push(fragment(clr::DOES_NOT_RETURN_ATTRIBUTE));
        }
        if function.extension_receiver.is_some() {
            doc.push(fragment(clr::EXTENSION_ATTRIBUTE));
        }

        let mut header = vec![fragment(function.visibility.cs_keyword())];
        if function.is_static {
            header.push(fragment("static "));
        }
        if let Some(modifier) = self.member_modality(function.modality, &function.name) {
            header.push(modifier);
        }
        header.push(fragment(format!(
            "{} ",
            self.types.map_return_type(&function.return_type)
        )));
        header.push(fragment(format!("{}(", name)));

        let mut params = Vec::new();
        if let Some(receiver) = &function.extension_receiver {
            params.push(fragment(format!("{} receiver", self.types.map_type(&receiver.ty))));
        }
        for param in &function.parameters {
            params.push(self.emit_parameter(param));
        }
        header.extend(join(params, ", "));
        header.push(fragment(")"));
        doc.push(line(header));

        doc.push(match &function.body {
            Some(body) => self.emit_body(body),
            None => stmt_block(Vec::new()),
        });
        lines(doc)
    }

    fn emit_parameter(&self, param: &crate::ir::IrParameter) -> CodeNode {
        match param.name.mangled() {
            Some(name) => fragment(format!("{} {}", self.types.map_type(&param.ty), name)),
            None => unsupported(
                format!("parameter name: {}", param.name.describe()),
                "emit_parameter",
                vec![],
            ),
        }
    }

    /// Constructors are named after the enclosing class; a delegating call in
    /// first body position becomes the `: base(...)` header suffix, and
    /// receiver-dependent property initializers become trailing assignments.
    fn emit_constructor(&self, class: &IrClass, ctor: &IrConstructor) -> CodeNode {
        let Some(class_name) = class.name.mangled() else {
            return unsupported(
                format!("constructor of class: {}", class.name.describe()),
                "emit_constructor",
                vec![],
            );
        };

        let mut header = vec![fragment(ctor.visibility.cs_keyword()), fragment(format!("{}(", class_name))];
        let mut params = Vec::new();
        if let Some(receiver) = &ctor.extension_receiver {
            params.push(fragment(format!("{} receiver", self.types.map_type(&receiver.ty))));
        }
        for param in &ctor.parameters {
            params.push(self.emit_parameter(param));
        }
        header.extend(join(params, ", "));
        header.push(fragment(")"));

        if let Some(delegation) = self.delegation_suffix(ctor.body.as_ref()) {
            header.push(fragment(" : "));
            header.push(delegation);
        }

        let mut statements = match &ctor.body {
            Some(body) => self.emit_statements(&body.statements),
            None => Vec::new(),
        };
        for property in class.properties() {
            let Some(initializer) = &property.initializer else { continue };
            let Some(name) = property.name.mangled() else { continue };
            statements.push(line(vec![
                fragment(format!("this.{} = ", name)),
                self.emit_expr_value(initializer),
                fragment(";"),
            ]));
        }

        lines(vec![line(header), stmt_block(statements)])
    }

    fn emit_property(&self, property: &IrProperty) -> Result<CodeNode, EmitError> {
        let ty = property
            .declared_type()
            .ok_or_else(|| EmitError::PropertyWithoutAccessor {
                property: property.name.describe(),
            })?;

        let mut header = vec![fragment(property.visibility.cs_keyword())];
        let is_static = property.is_static
            || property.getter.as_ref().is_some_and(|g| g.is_static)
            || property.setter.as_ref().is_some_and(|s| s.is_static);
        if is_static {
            header.push(fragment("static "));
        }
        if let Some(modifier) = self.member_modality(property.modality, &property.name) {
            header.push(modifier);
        }
        header.push(fragment(format!("{} ", self.types.map_type(ty))));
        header.push(self.emit_decl_name(&property.name));

        let mut accessors = Vec::new();
        if property.getter.is_some() {
            accessors.push(fragment("get;"));
        }
        if property.setter.is_some() {
            accessors.push(fragment("set;"));
        }
        Ok(lines(vec![line(header), block(accessors)]))
    }

    pub(crate) fn emit_body(&self, body: &IrBody) -> CodeNode {
        stmt_block(self.emit_statements(&body.statements))
    }

    pub(crate) fn emit_variable(&self, variable: &IrVariable) -> CodeNode {
        let Some(name) = variable.name.mangled() else {
            return unsupported(
                format!("variable name: {}", variable.name.describe()),
                "emit_variable",
                vec![],
            );
        };
        let mut nodes = vec![fragment(format!("{} {}", self.types.map_type(&variable.ty), name))];
        if let Some(initializer) = &variable.initializer {
            nodes.push(fragment(" = "));
            nodes.push(self.emit_expr_value(initializer));
        }
        line(nodes)
    }

    pub(crate) fn emit_decl_name(&self, name: &Name) -> CodeNode {
        match name.mangled() {
            Some(text) => fragment(text),
            None => unsupported(format!("special name: {}", name.describe()), "emit_decl_name", vec![]),
        }
    }

    /// Modality modifier in class-header position: Kotlin classes are final
    /// unless opened, C# classes the other way around.
    fn class_modality(&self, class: &IrClass) -> CodeNode {
        match class.modality {
            Modality::Final => fragment("sealed "),
            Modality::Abstract => fragment("abstract "),
            Modality::Open => CodeNode::Empty,
            Modality::Sealed => unsupported(
                "modality: sealed",
                "class_modality",
                vec![class.name.describe()],
            ),
        }
    }

    /// Modality modifier in member position.
    fn member_modality(&self, modality: Modality, name: &Name) -> Option<CodeNode> {
        match modality {
            Modality::Final => None,
            Modality::Open => Some(fragment("virtual ")),
            Modality::Abstract => Some(fragment("abstract ")),
            Modality::Sealed => Some(unsupported(
                "modality: sealed",
                "member_modality",
                vec![name.describe()],
            )),
        }
    }

    fn supertype_suffix(&self, class: &IrClass) -> Vec<CodeNode> {
        if class.super_types.is_empty() {
            return Vec::new();
        }
        let list: Vec<String> = class.super_types.iter().map(|t| self.types.map_type(t)).collect();
        vec![fragment(format!(" : {}", list.join(", ")))]
    }

    /// Emit the `base(...)` suffix when the first body statement is a
    /// delegating constructor call.
    fn delegation_suffix(&self, body: Option<&IrBody>) -> Option<CodeNode> {
        let body = body?;
        match body.statements.first()? {
            IrStmt::Expr(expr) => match &expr.kind {
                IrExprKind::DelegatingConstructorCall { arguments } => Some(self.emit_delegating_call(arguments)),
                _ => None,
            },
            _ => None,
        }
    }
}

pub(crate) fn decl_kind_name(decl: &IrDecl) -> &'static str {
    match decl {
        IrDecl::Class(_) => "class",
        IrDecl::Function(_) => "function",
        IrDecl::Constructor(_) => "constructor",
        IrDecl::Property(_) => "property",
        IrDecl::Variable(_) => "variable",
        IrDecl::TypeParameter(_) => "type parameter",
    }
}
