//! Normalization passes run over a module before generation.
//!
//! Each pass rewrites the IR into a shape the generator handles directly.
//! Passes run in a fixed order and each pass's postcondition is the next
//! pass's precondition:
//!
//! 1. `parent_patch` - repair cross-module callee owners
//! 2. `expect_removal` - drop expect-only declarations
//! 3. `const_fold` - evaluate compile-time-constant expressions
//! 4. `file_class` - re-parent file-scope declarations into a static container
//! 5. `builtins` - rewrite range/progression idioms into runtime constructors
//! 6. `default_ctor` - synthesize missing no-argument constructors
//! 7. `entry_point` - synthesize the runtime-invokable `Main` wrapper
//!
//! Every pass takes the module by value and returns it; the pipeline owns
//! sequencing. Re-running the pipeline on an already-lowered module is a
//! no-op. A pass that meets an unexpected shape leaves the node unchanged
//! and lets the generator emit a placeholder, so translation stays
//! best-effort per declaration.

mod builtins;
mod const_fold;
mod default_ctor;
mod entry_point;
mod errors;
mod expect_removal;
mod file_class;
mod parent_patch;

pub use errors::{LoweringError, LoweringErrors};

use crate::ir::{IrBody, IrDecl, IrExpr, IrModuleFragment, IrStmt};

type Pass = fn(IrModuleFragment, &mut Vec<LoweringError>) -> IrModuleFragment;

const PASSES: &[(&str, Pass)] = &[
    ("parent_patch", parent_patch::run),
    ("expect_removal", expect_removal::run),
    ("const_fold", const_fold::run),
    ("file_class", file_class::run),
    ("builtins", builtins::run),
    ("default_ctor", default_ctor::run),
    ("entry_point", entry_point::run),
];

/// Run the full lowering pipeline over one module.
#[tracing::instrument(skip_all, fields(module = %module.name, file_count = module.files.len()))]
pub fn lower_module(mut module: IrModuleFragment) -> Result<IrModuleFragment, LoweringErrors> {
    let mut errors = Vec::new();
    for (name, pass) in PASSES {
        tracing::debug!(pass = name, "running lowering pass");
        module = pass(module, &mut errors);
    }
    match LoweringErrors::from_vec(errors) {
        None => Ok(module),
        Some(errors) => Err(errors),
    }
}

/// Apply `f` to every expression in the module, bottom-up. The expression
/// rewriting passes share this walk.
pub(crate) fn for_each_expr_mut(module: &mut IrModuleFragment, f: &mut dyn FnMut(&mut IrExpr)) {
    for file in &mut module.files {
        for decl in &mut file.declarations {
            walk_decl_exprs(decl, f);
        }
    }
}

fn walk_decl_exprs(decl: &mut IrDecl, f: &mut dyn FnMut(&mut IrExpr)) {
    match decl {
        IrDecl::Class(class) => {
            for member in &mut class.declarations {
                walk_decl_exprs(member, f);
            }
        }
        IrDecl::Function(function) => {
            if let Some(body) = &mut function.body {
                walk_body_exprs(body, f);
            }
        }
        IrDecl::Constructor(ctor) => {
            if let Some(body) = &mut ctor.body {
                walk_body_exprs(body, f);
            }
        }
        IrDecl::Property(property) => {
            if let Some(initializer) = &mut property.initializer {
                initializer.walk_mut(f);
            }
        }
        IrDecl::Variable(variable) => {
            if let Some(initializer) = &mut variable.initializer {
                initializer.walk_mut(f);
            }
        }
        IrDecl::TypeParameter(_) => {}
    }
}

fn walk_body_exprs(body: &mut IrBody, f: &mut dyn FnMut(&mut IrExpr)) {
    for stmt in &mut body.statements {
        match stmt {
            IrStmt::Expr(expr) => expr.walk_mut(f),
            IrStmt::Variable(variable) => {
                if let Some(initializer) = &mut variable.initializer {
                    initializer.walk_mut(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ClassKind, IrClass, IrFile, IrFunction, IrType};

    #[test]
    fn test_pipeline_is_idempotent() {
        let mut file = IrFile::new("main", &["app"]);
        let mut main = IrFunction::new("main", IrType::Unit);
        main.body = Some(IrBody::default());
        file.declarations.push(IrDecl::Function(main));
        file.declarations.push(IrDecl::Class(IrClass::new(ClassKind::Class, "User")));
        let module = IrModuleFragment {
            name: "app".into(),
            files: vec![file],
        };

        let Ok(once) = lower_module(module) else {
            panic!("first lowering failed");
        };
        let Ok(twice) = lower_module(once.clone()) else {
            panic!("second lowering failed");
        };
        assert_eq!(format!("{:?}", once), format!("{:?}", twice));
    }
}
