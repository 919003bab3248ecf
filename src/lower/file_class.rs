//! Re-parent file-scope declarations into a synthesized static container.
//!
//! The target has no file-scope executable declarations, so every top-level
//! function/property/variable of `foo.kt` moves into a `FooKt` file class
//! (the facade naming convention). Class-like declarations stay at file
//! scope; generation marks the container with the file-class attribute.

use crate::ir::{ClassKind, IrClass, IrDecl, IrModuleFragment, Modality, Visibility};

use super::LoweringError;

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    for file in &mut module.files {
        let (classes, loose): (Vec<IrDecl>, Vec<IrDecl>) = file
            .declarations
            .drain(..)
            .partition(|decl| matches!(decl, IrDecl::Class(_)));
        file.declarations = classes;

        if loose.is_empty() {
            continue;
        }

        let mut container = IrClass::new(ClassKind::FileClass, container_name(&file.name));
        container.visibility = Visibility::Public;
        container.modality = Modality::Final;
        container.package = file.package.clone();
        container.declarations = loose.into_iter().map(make_static).collect();
        tracing::debug!(file = %file.name, container = %container.name.describe(), "synthesized file container");
        file.declarations.push(IrDecl::Class(container));
    }
    module
}

/// `foo` (or `foo.kt`) names a `FooKt` container.
fn container_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".kt").unwrap_or(file_name);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => format!("{}{}Kt", first.to_uppercase(), chars.as_str()),
        None => "Kt".to_string(),
    }
}

/// Container members are always static: they had no instance to begin with.
fn make_static(mut decl: IrDecl) -> IrDecl {
    match &mut decl {
        IrDecl::Function(function) => function.is_static = true,
        IrDecl::Property(property) => property.is_static = true,
        _ => {}
    }
    decl
}
