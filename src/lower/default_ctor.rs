//! Synthesize a trivial no-argument constructor for classes that declare
//! none, so generation can rely on every constructible class having at least
//! one. Detects existing constructors first: re-running the pass never adds
//! a second.

use crate::ir::{ClassKind, IrClass, IrConstructor, IrDecl, IrModuleFragment};

use super::LoweringError;

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    for file in &mut module.files {
        for decl in &mut file.declarations {
            if let IrDecl::Class(class) = decl {
                ensure_constructor(class);
            }
        }
    }
    module
}

fn ensure_constructor(class: &mut IrClass) {
    // Interfaces, enums, annotations and static file containers are never
    // constructed through a synthesized constructor.
    if matches!(class.kind, ClassKind::Class | ClassKind::Object) && class.constructors().next().is_none() {
        class.declarations.push(IrDecl::Constructor(IrConstructor::trivial()));
    }
    for member in &mut class.declarations {
        if let IrDecl::Class(nested) = member {
            ensure_constructor(nested);
        }
    }
}
