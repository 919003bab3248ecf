//! Synthesize the entry-point wrapper the target runtime invokes directly.
//!
//! A top-level `main` with zero parameters, or a single `Array<String>`
//! parameter, is eligible. File-container synthesis has already run, so
//! eligible functions live on file-class containers; the wrapper is a static
//! `Main(string[] args)` on the same container that forwards to it. Two
//! eligible functions in one module make the module unusable: which one the
//! runtime should start is undecidable, and that surfaces as a hard error.

use crate::ir::{
    Callee, ClassKind, ClassRef, IrBody, IrCall, IrDecl, IrExpr, IrExprKind, IrFunction, IrModuleFragment,
    IrParameter, IrStmt, IrType, Name,
};

use super::LoweringError;

pub(super) fn run(mut module: IrModuleFragment, errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    let mut candidates = Vec::new();
    for (file_idx, file) in module.files.iter().enumerate() {
        for (decl_idx, decl) in file.declarations.iter().enumerate() {
            let IrDecl::Class(class) = decl else { continue };
            if class.kind != ClassKind::FileClass {
                continue;
            }
            for member in &class.declarations {
                let IrDecl::Function(function) = member else { continue };
                if let Some(takes_args) = eligibility(function) {
                    let qualified = qualified_name(&class.package, &class.name.describe());
                    candidates.push((file_idx, decl_idx, takes_args, qualified));
                }
            }
        }
    }

    match candidates.as_slice() {
        [] => module,
        [(file_idx, decl_idx, takes_args, _)] => {
            let (file_idx, decl_idx, takes_args) = (*file_idx, *decl_idx, *takes_args);
            if let IrDecl::Class(container) = &mut module.files[file_idx].declarations[decl_idx] {
                let already_wrapped = container.declarations.iter().any(|d| {
                    matches!(d, IrDecl::Function(f) if f.name == Name::ident("Main"))
                });
                if !already_wrapped {
                    let wrapper = make_wrapper(container.class_ref(), takes_args);
                    tracing::debug!(container = %container.name.describe(), "synthesized entry-point wrapper");
                    container.declarations.push(IrDecl::Function(wrapper));
                }
            }
            module
        }
        [(.., first), (.., second), ..] => {
            errors.push(LoweringError::AmbiguousEntryPoint {
                first: format!("{}.main", first),
                second: format!("{}.main", second),
            });
            module
        }
    }
}

/// `Some(takes_args)` when the function can be the program entry point.
fn eligibility(function: &IrFunction) -> Option<bool> {
    if function.name != Name::ident("main") || function.is_expect || function.is_fake_override {
        return None;
    }
    match function.parameters.as_slice() {
        [] => Some(false),
        [param] if param.ty == string_array() => Some(true),
        _ => None,
    }
}

fn make_wrapper(container: ClassRef, takes_args: bool) -> IrFunction {
    let arguments = if takes_args {
        vec![IrExpr::new(IrExprKind::GetValue(Name::ident("args")), string_array())]
    } else {
        Vec::new()
    };
    let forward = IrExpr::new(
        IrExprKind::Call(IrCall {
            callee: Callee::static_member(container, Name::ident("main")),
            dispatch_receiver: None,
            extension_receiver: None,
            arguments,
        }),
        IrType::Unit,
    );

    let mut wrapper = IrFunction::new("Main", IrType::Unit);
    wrapper.is_static = true;
    wrapper.parameters = vec![IrParameter::new("args", string_array())];
    wrapper.body = Some(IrBody::new(vec![IrStmt::Expr(forward)]));
    wrapper
}

fn string_array() -> IrType {
    IrType::generic(&["kotlin"], "Array", vec![IrType::string()])
}

fn qualified_name(package: &[String], container: &str) -> String {
    if package.is_empty() {
        container.to_string()
    } else {
        format!("{}.{}", package.join("."), container)
    }
}
