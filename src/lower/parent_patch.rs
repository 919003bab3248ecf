//! Repair callee owners for calls that cross module boundaries.
//!
//! The front end leaves calls into already-compiled modules with a dangling
//! owner reference. Generation resolves external calls through the intrinsic
//! table, which requires an external-package owner, so this pass rewrites
//! every dangling owner into one.

use crate::ir::{CalleeOwner, IrExprKind, IrModuleFragment};

use super::{LoweringError, for_each_expr_mut};

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    let mut patched = 0usize;
    for_each_expr_mut(&mut module, &mut |expr| {
        if let IrExprKind::Call(call) = &mut expr.kind {
            if let CalleeOwner::UnresolvedModule(name) = &mut call.callee.owner {
                let package = std::mem::take(name);
                call.callee.owner = CalleeOwner::ExternalPackage(package);
                patched += 1;
            }
        }
    });
    if patched > 0 {
        tracing::debug!(patched, "patched cross-module callee owners");
    }
    module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Callee, IrBody, IrCall, IrDecl, IrExpr, IrFile, IrFunction, IrStmt, IrType, Name};

    fn module_with_call(owner: CalleeOwner) -> IrModuleFragment {
        let call = IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee {
                    name: Name::ident("greater"),
                    owner,
                    is_static: false,
                    is_clr_static: false,
                    is_operator: false,
                },
                dispatch_receiver: None,
                extension_receiver: None,
                arguments: vec![],
            }),
            IrType::Unit,
        );
        let mut function = IrFunction::new("run", IrType::Unit);
        function.body = Some(IrBody::new(vec![IrStmt::Expr(call)]));
        let mut file = IrFile::new("main", &[]);
        file.declarations.push(IrDecl::Function(function));
        IrModuleFragment {
            name: "app".into(),
            files: vec![file],
        }
    }

    fn sole_owner(module: &IrModuleFragment) -> Option<CalleeOwner> {
        let IrDecl::Function(f) = module.files.first()?.declarations.first()? else {
            return None;
        };
        let IrStmt::Expr(expr) = f.body.as_ref()?.statements.first()? else {
            return None;
        };
        let IrExprKind::Call(call) = &expr.kind else {
            return None;
        };
        Some(call.callee.owner.clone())
    }

    #[test]
    fn test_unresolved_owner_becomes_external_package() {
        let module = module_with_call(CalleeOwner::UnresolvedModule("kotlin.internal.ir".into()));
        let module = run(module, &mut Vec::new());
        assert!(matches!(
            sole_owner(&module),
            Some(CalleeOwner::ExternalPackage(p)) if p == "kotlin.internal.ir"
        ));
    }

    #[test]
    fn test_resolved_owner_is_untouched() {
        let module = module_with_call(CalleeOwner::ExternalPackage("kotlin.internal.ir".into()));
        let module = run(module, &mut Vec::new());
        assert!(matches!(sole_owner(&module), Some(CalleeOwner::ExternalPackage(_))));
    }
}
