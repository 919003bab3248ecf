//! Evaluate compile-time-constant expressions in place.
//!
//! Folding shrinks the surface the generator must cover. Failure to fold is
//! not an error: anything this pass cannot evaluate is left for the
//! generator to translate as-is.

use kclr_core::clr;

use crate::ir::{CalleeOwner, ConstValue, IrCall, IrExpr, IrExprKind, IrModuleFragment, Name};

use super::{LoweringError, for_each_expr_mut};

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    for_each_expr_mut(&mut module, &mut fold);
    module
}

fn fold(expr: &mut IrExpr) {
    let folded = match &expr.kind {
        IrExprKind::Call(call) => fold_call(call),
        IrExprKind::StringConcat(parts) => fold_concat(parts),
        _ => None,
    };
    if let Some(value) = folded {
        expr.kind = IrExprKind::Const(value);
    }
}

fn fold_call(call: &IrCall) -> Option<ConstValue> {
    let Name::Ident(name) = &call.callee.name else {
        return None;
    };
    match &call.callee.owner {
        CalleeOwner::ExternalPackage(package) if package == clr::INTRINSIC_PACKAGE && name == "greater" => {
            let lhs = const_int(call.arguments.first()?)?;
            let rhs = const_int(call.arguments.get(1)?)?;
            Some(ConstValue::Boolean(lhs > rhs))
        }
        CalleeOwner::Class(_) if call.callee.is_operator && call.arguments.len() == 1 => {
            let receiver = call.dispatch_receiver.as_deref()?;
            let argument = call.arguments.first()?;
            fold_operator(name, receiver, argument)
        }
        _ => None,
    }
}

fn fold_operator(name: &str, receiver: &IrExpr, argument: &IrExpr) -> Option<ConstValue> {
    let (IrExprKind::Const(lhs), IrExprKind::Const(rhs)) = (&receiver.kind, &argument.kind) else {
        return None;
    };
    match (name, lhs, rhs) {
        ("plus", ConstValue::Int(a), ConstValue::Int(b)) => Some(ConstValue::Int(a.wrapping_add(*b))),
        ("times", ConstValue::Int(a), ConstValue::Int(b)) => Some(ConstValue::Int(a.wrapping_mul(*b))),
        ("plus", ConstValue::Str(a), ConstValue::Str(b)) => Some(ConstValue::Str(format!("{}{}", a, b))),
        _ => None,
    }
}

/// A string template whose parts are all string constants folds to one
/// constant; mixed parts stay a concatenation.
fn fold_concat(parts: &[IrExpr]) -> Option<ConstValue> {
    let mut text = String::new();
    for part in parts {
        match &part.kind {
            IrExprKind::Const(ConstValue::Str(s)) => text.push_str(s),
            _ => return None,
        }
    }
    Some(ConstValue::Str(text))
}

fn const_int(expr: &IrExpr) -> Option<i64> {
    match &expr.kind {
        IrExprKind::Const(ConstValue::Int(n)) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Callee, ClassRef, IrType, PrimitiveType};

    fn int(value: i64) -> IrExpr {
        IrExpr::new(IrExprKind::Const(ConstValue::Int(value)), IrType::Primitive(PrimitiveType::Int))
    }

    fn str_const(text: &str) -> IrExpr {
        IrExpr::new(IrExprKind::Const(ConstValue::Str(text.into())), IrType::string())
    }

    #[test]
    fn test_int_plus_folds() {
        let mut expr = IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee::operator(ClassRef::new(&["kotlin"], "Int"), "plus"),
                dispatch_receiver: Some(Box::new(int(2))),
                extension_receiver: None,
                arguments: vec![int(3)],
            }),
            IrType::Primitive(PrimitiveType::Int),
        );
        fold(&mut expr);
        assert!(matches!(expr.kind, IrExprKind::Const(ConstValue::Int(5))));
    }

    #[test]
    fn test_greater_intrinsic_folds_on_constants() {
        let mut expr = IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee {
                    name: Name::ident("greater"),
                    owner: CalleeOwner::ExternalPackage(clr::INTRINSIC_PACKAGE.to_string()),
                    is_static: false,
                    is_clr_static: false,
                    is_operator: false,
                },
                dispatch_receiver: None,
                extension_receiver: None,
                arguments: vec![int(4), int(9)],
            }),
            IrType::Primitive(PrimitiveType::Boolean),
        );
        fold(&mut expr);
        assert!(matches!(expr.kind, IrExprKind::Const(ConstValue::Boolean(false))));
    }

    #[test]
    fn test_all_constant_template_folds_to_one_string() {
        let mut expr = IrExpr::new(
            IrExprKind::StringConcat(vec![str_const("a"), str_const("b")]),
            IrType::string(),
        );
        fold(&mut expr);
        assert!(matches!(&expr.kind, IrExprKind::Const(ConstValue::Str(s)) if s == "ab"));
    }

    #[test]
    fn test_non_constant_operand_is_left_alone() {
        let variable = IrExpr::new(
            IrExprKind::GetValue(Name::ident("n")),
            IrType::Primitive(PrimitiveType::Int),
        );
        let mut expr = IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee::operator(ClassRef::new(&["kotlin"], "Int"), "plus"),
                dispatch_receiver: Some(Box::new(variable)),
                extension_receiver: None,
                arguments: vec![int(3)],
            }),
            IrType::Primitive(PrimitiveType::Int),
        );
        fold(&mut expr);
        assert!(matches!(expr.kind, IrExprKind::Call(_)));
    }
}
