//! Strip declarations that exist only for the front end's expect/actual
//! contract. They have no executable meaning in the target and must never
//! reach the generator.

use crate::ir::{IrDecl, IrModuleFragment};

use super::LoweringError;

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    for file in &mut module.files {
        retain_emittable(&mut file.declarations);
    }
    module
}

fn retain_emittable(declarations: &mut Vec<IrDecl>) {
    declarations.retain(|decl| !decl.is_expect());
    for decl in declarations {
        if let IrDecl::Class(class) = decl {
            retain_emittable(&mut class.declarations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ClassKind, IrClass, IrFile, IrFunction, IrType};

    #[test]
    fn test_expect_declarations_are_removed_recursively() {
        let mut expect_fn = IrFunction::new("platformName", IrType::string());
        expect_fn.is_expect = true;
        let mut class = IrClass::new(ClassKind::Class, "Host");
        class.declarations.push(IrDecl::Function(expect_fn.clone()));
        class.declarations.push(IrDecl::Function(IrFunction::new("run", IrType::Unit)));

        let mut file = IrFile::new("main", &[]);
        file.declarations.push(IrDecl::Function(expect_fn));
        file.declarations.push(IrDecl::Class(class));

        let module = run(
            IrModuleFragment {
                name: "app".into(),
                files: vec![file],
            },
            &mut Vec::new(),
        );

        let file = &module.files[0];
        assert_eq!(file.declarations.len(), 1);
        let IrDecl::Class(class) = &file.declarations[0] else {
            panic!("expected the class to survive");
        };
        assert_eq!(class.declarations.len(), 1);
    }
}
