//! Rewrite range and progression idioms into runtime constructor calls.
//!
//! `a.rangeTo(b)`, `a until b`, `a downTo b` and `range step n` have no
//! target-language counterpart; they lower to explicit constructions of the
//! runtime types `kotlin.ranges.IntRange` / `CharRange` /
//! `IntProgression` / `CharProgression`. The walk is bottom-up, so a `step`
//! call always sees its receiver already rewritten.

use kclr_core::clr;

use crate::ir::{
    Callee, ClassRef, ConstValue, IrCall, IrExpr, IrExprKind, IrModuleFragment, IrType, Name, PrimitiveType,
};

use super::{LoweringError, for_each_expr_mut};

pub(super) fn run(mut module: IrModuleFragment, _errors: &mut Vec<LoweringError>) -> IrModuleFragment {
    for_each_expr_mut(&mut module, &mut lower);
    module
}

fn lower(expr: &mut IrExpr) {
    let IrExprKind::Call(call) = &expr.kind else {
        return;
    };
    let Name::Ident(name) = &call.callee.name else {
        return;
    };
    if !matches!(name.as_str(), "rangeTo" | "until" | "downTo" | "step") {
        return;
    }
    let name = name.clone();
    let kind = std::mem::replace(&mut expr.kind, IrExprKind::InstanceInitializerCall);
    expr.kind = match kind {
        IrExprKind::Call(call) => match name.as_str() {
            "rangeTo" => lower_range(call, &mut expr.ty, false),
            "until" => lower_range(call, &mut expr.ty, true),
            "downTo" => lower_down_to(call, &mut expr.ty),
            "step" => lower_step(call, &mut expr.ty),
            _ => IrExprKind::Call(call),
        },
        other => other,
    };
}

/// `a.rangeTo(b)` → `IntRange(a, b)` / `CharRange(a, b)`;
/// `a until b` → `IntRange(a, (b) + (-1))`, integers only.
fn lower_range(mut call: IrCall, ty: &mut IrType, exclusive: bool) -> IrExprKind {
    let target = match receiver_element(&call) {
        Some(PrimitiveType::Int) => "IntRange",
        Some(PrimitiveType::Char) if !exclusive => "CharRange",
        _ => return IrExprKind::Call(call),
    };
    if call.arguments.len() != 1 {
        return IrExprKind::Call(call);
    }
    let Some(receiver) = call.dispatch_receiver.take() else {
        return IrExprKind::Call(call);
    };
    let Some(mut last) = call.arguments.pop() else {
        return IrExprKind::Call(call);
    };
    if exclusive {
        last = minus_one(last);
    }
    range_construction(target, vec![*receiver, last], ty)
}

/// `a downTo b` → `IntProgression(a, b, -1)` / `CharProgression(a, b, -1)`.
fn lower_down_to(mut call: IrCall, ty: &mut IrType) -> IrExprKind {
    let target = match receiver_element(&call) {
        Some(PrimitiveType::Int) => "IntProgression",
        Some(PrimitiveType::Char) => "CharProgression",
        _ => return IrExprKind::Call(call),
    };
    if call.arguments.len() != 1 {
        return IrExprKind::Call(call);
    }
    let Some(receiver) = call.dispatch_receiver.take() else {
        return IrExprKind::Call(call);
    };
    let Some(last) = call.arguments.pop() else {
        return IrExprKind::Call(call);
    };
    range_construction(target, vec![*receiver, last, int_const(-1)], ty)
}

/// `range step n` → a progression construction reusing the range's own
/// bounds. Only applies once the receiver is a lowered range/progression
/// construction; anything else is left for the generator.
fn lower_step(mut call: IrCall, ty: &mut IrType) -> IrExprKind {
    let target = match &call.dispatch_receiver {
        Some(receiver) => match &receiver.kind {
            IrExprKind::ConstructorCall { class, arguments }
                if class.package == clr::RANGES_PACKAGE && arguments.len() >= 2 =>
            {
                match class.name.as_str() {
                    "IntRange" | "IntProgression" => Some("IntProgression"),
                    "CharRange" | "CharProgression" => Some("CharProgression"),
                    _ => None,
                }
            }
            _ => None,
        },
        None => None,
    };
    let Some(target) = target else {
        return IrExprKind::Call(call);
    };
    if call.arguments.len() != 1 {
        return IrExprKind::Call(call);
    }
    let (Some(receiver), Some(step)) = (call.dispatch_receiver.take(), call.arguments.pop()) else {
        return IrExprKind::Call(call);
    };
    // Receiver shape checked above.
    let IrExprKind::ConstructorCall { arguments, .. } = receiver.kind else {
        return IrExprKind::Call(call);
    };
    let mut bounds = arguments.into_iter();
    let (Some(first), Some(last)) = (bounds.next(), bounds.next()) else {
        return IrExprKind::Call(call);
    };
    range_construction(target, vec![first, last, step], ty)
}

fn range_construction(target: &str, arguments: Vec<IrExpr>, ty: &mut IrType) -> IrExprKind {
    let class = ClassRef::new(&clr::RANGES_PACKAGE, target);
    *ty = class.default_type();
    IrExprKind::ConstructorCall { class, arguments }
}

fn receiver_element(call: &IrCall) -> Option<PrimitiveType> {
    match &call.dispatch_receiver.as_deref()?.ty {
        IrType::Primitive(p @ (PrimitiveType::Int | PrimitiveType::Char)) => Some(*p),
        _ => None,
    }
}

fn int_const(value: i64) -> IrExpr {
    IrExpr::new(
        IrExprKind::Const(ConstValue::Int(value)),
        IrType::Primitive(PrimitiveType::Int),
    )
}

fn minus_one(bound: IrExpr) -> IrExpr {
    IrExpr::new(
        IrExprKind::Call(IrCall {
            callee: Callee::operator(ClassRef::new(&["kotlin"], "Int"), "plus"),
            dispatch_receiver: Some(Box::new(bound)),
            extension_receiver: None,
            arguments: vec![int_const(-1)],
        }),
        IrType::Primitive(PrimitiveType::Int),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> IrExpr {
        int_const(value)
    }

    fn char_const(c: char) -> IrExpr {
        IrExpr::new(
            IrExprKind::Const(ConstValue::Char(c)),
            IrType::Primitive(PrimitiveType::Char),
        )
    }

    fn range_call(name: &str, receiver: IrExpr, argument: IrExpr) -> IrExpr {
        IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee::operator(ClassRef::new(&["kotlin"], "Int"), name),
                dispatch_receiver: Some(Box::new(receiver)),
                extension_receiver: None,
                arguments: vec![argument],
            }),
            IrType::class(&["kotlin", "ranges"], "IntRange"),
        )
    }

    #[test]
    fn test_range_to_becomes_int_range_construction() {
        let mut expr = range_call("rangeTo", int(1), int(10));
        expr.walk_mut(&mut lower);
        let IrExprKind::ConstructorCall { class, arguments } = &expr.kind else {
            panic!("expected a constructor call: {:?}", expr.kind);
        };
        assert_eq!(class.name, "IntRange");
        assert_eq!(class.package, vec!["kotlin".to_string(), "ranges".to_string()]);
        assert_eq!(arguments.len(), 2);
    }

    #[test]
    fn test_char_range_to_targets_char_range() {
        let mut expr = range_call("rangeTo", char_const('a'), char_const('z'));
        expr.walk_mut(&mut lower);
        let IrExprKind::ConstructorCall { class, .. } = &expr.kind else {
            panic!("expected a constructor call");
        };
        assert_eq!(class.name, "CharRange");
    }

    #[test]
    fn test_down_to_appends_negative_step() {
        let mut expr = range_call("downTo", int(10), int(1));
        expr.walk_mut(&mut lower);
        let IrExprKind::ConstructorCall { class, arguments } = &expr.kind else {
            panic!("expected a constructor call");
        };
        assert_eq!(class.name, "IntProgression");
        assert_eq!(arguments.len(), 3);
        assert!(matches!(
            &arguments[2].kind,
            IrExprKind::Const(ConstValue::Int(-1))
        ));
    }

    #[test]
    fn test_step_reuses_the_lowered_range_bounds() {
        let range = range_call("rangeTo", int(1), int(10));
        let mut expr = IrExpr::new(
            IrExprKind::Call(IrCall {
                callee: Callee::operator(ClassRef::new(&["kotlin", "ranges"], "IntRange"), "step"),
                dispatch_receiver: Some(Box::new(range)),
                extension_receiver: None,
                arguments: vec![int(2)],
            }),
            IrType::class(&["kotlin", "ranges"], "IntProgression"),
        );
        expr.walk_mut(&mut lower);
        let IrExprKind::ConstructorCall { class, arguments } = &expr.kind else {
            panic!("expected a constructor call");
        };
        assert_eq!(class.name, "IntProgression");
        assert_eq!(arguments.len(), 3);
        assert!(matches!(&arguments[2].kind, IrExprKind::Const(ConstValue::Int(2))));
    }

    #[test]
    fn test_unrelated_receiver_type_is_left_alone() {
        let receiver = IrExpr::new(IrExprKind::GetValue(Name::ident("xs")), IrType::string());
        let mut expr = range_call("rangeTo", receiver, int(10));
        expr.walk_mut(&mut lower);
        assert!(matches!(expr.kind, IrExprKind::Call(_)));
    }
}
