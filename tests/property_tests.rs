//! Property-based tests for the backend.
//!
//! These use proptest to verify pipeline invariants across many randomly
//! generated IR shapes, catching edge cases that hand-written tests might
//! miss: generation never panics, well-formed input renders without
//! placeholders, and lowering is idempotent.

use kclr::ir::{
    Callee, ClassKind, ClassRef, ConstValue, IrBody, IrBranch, IrCall, IrClass, IrDecl, IrExpr, IrExprKind, IrFile,
    IrFunction, IrModuleFragment, IrStmt, IrType, IrWhen, Name, PrimitiveType, Visibility,
};
use kclr::{Backend, lower_module};
use proptest::prelude::*;

fn int(value: i64) -> IrExpr {
    IrExpr::new(
        IrExprKind::Const(ConstValue::Int(value)),
        IrType::Primitive(PrimitiveType::Int),
    )
}

fn str_const(text: String) -> IrExpr {
    IrExpr::new(IrExprKind::Const(ConstValue::Str(text)), IrType::string())
}

fn bool_const(value: bool) -> IrExpr {
    IrExpr::new(
        IrExprKind::Const(ConstValue::Boolean(value)),
        IrType::Primitive(PrimitiveType::Boolean),
    )
}

fn get_value(name: String) -> IrExpr {
    IrExpr::new(
        IrExprKind::GetValue(Name::ident(name)),
        IrType::Primitive(PrimitiveType::Int),
    )
}

fn plus(receiver: IrExpr, argument: IrExpr) -> IrExpr {
    IrExpr::new(
        IrExprKind::Call(IrCall {
            callee: Callee::operator(ClassRef::new(&["kotlin"], "Int"), "plus"),
            dispatch_receiver: Some(Box::new(receiver)),
            extension_receiver: None,
            arguments: vec![argument],
        }),
        IrType::Primitive(PrimitiveType::Int),
    )
}

/// A two-way conditional with an explicit else-arm, so value mode is always
/// well-formed.
fn when_value(condition: IrExpr, then_result: IrExpr, else_result: IrExpr) -> IrExpr {
    IrExpr::new(
        IrExprKind::When(IrWhen {
            branches: vec![
                IrBranch {
                    condition: Some(condition),
                    result: then_result,
                },
                IrBranch {
                    condition: None,
                    result: else_result,
                },
            ],
        }),
        IrType::Primitive(PrimitiveType::Int),
    )
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

fn expr_strategy() -> impl Strategy<Value = IrExpr> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(|n| int(n as i64)),
        "[a-z ]{0,8}".prop_map(str_const),
        any::<bool>().prop_map(bool_const),
        ident_strategy().prop_map(get_value),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| plus(a, b)),
            prop::collection::vec(inner.clone(), 1..3)
                .prop_map(|parts| IrExpr::new(IrExprKind::StringConcat(parts), IrType::string())),
            (inner.clone(), inner.clone(), inner).prop_map(|(c, a, b)| when_value(c, a, b)),
        ]
    })
}

fn function_strategy() -> impl Strategy<Value = IrFunction> {
    (
        ident_strategy(),
        prop::collection::vec((ident_strategy(), expr_strategy()), 0..4),
    )
        .prop_map(|(name, assignments)| {
            let statements = assignments
                .into_iter()
                .map(|(target, value)| {
                    IrStmt::Expr(IrExpr::new(
                        IrExprKind::SetValue {
                            target: Name::ident(target),
                            value: Box::new(value),
                        },
                        IrType::Unit,
                    ))
                })
                .collect();
            let mut function = IrFunction::new(name, IrType::Unit);
            function.body = Some(IrBody::new(statements));
            function
        })
}

fn module_strategy() -> impl Strategy<Value = IrModuleFragment> {
    prop::collection::vec(function_strategy(), 1..4).prop_map(|functions| {
        let mut file = IrFile::new("main", &["app"]);
        // Duplicate names would make an honest module ill-formed (two `main`s
        // are a hard ambiguity error); keep the first of each name.
        let mut seen = std::collections::HashSet::new();
        let functions = functions
            .into_iter()
            .filter(|f| seen.insert(f.name.describe()));
        file.declarations.extend(functions.map(IrDecl::Function));
        IrModuleFragment {
            name: "app".into(),
            files: vec![file],
        }
    })
}

proptest! {
    /// Property: well-formed modules compile without panicking and without
    /// placeholder comments in the output.
    #[test]
    fn well_formed_modules_render_placeholder_free(module in module_strategy()) {
        let outputs = Backend::new().compile_module(module).expect("compile failed");
        for output in outputs {
            prop_assert!(!output.source.contains("Unsupported"));
            prop_assert!(output.source.ends_with('\n') || output.source.is_empty());
        }
    }

    /// Property: re-running the lowering pipeline is a no-op.
    #[test]
    fn lowering_is_idempotent(module in module_strategy()) {
        let once = lower_module(module).expect("first lowering failed");
        let twice = lower_module(once.clone()).expect("second lowering failed");
        prop_assert_eq!(format!("{:?}", once), format!("{:?}", twice));
    }

    /// Property: identifiers that collide with C# keywords always render
    /// with the verbatim-identifier prefix.
    #[test]
    fn keyword_identifiers_render_escaped(
        keyword in prop::sample::select(vec!["class", "event", "lock", "int", "namespace", "operator"])
    ) {
        let mut function = IrFunction::new(keyword, IrType::Unit);
        function.body = Some(IrBody::default());
        let mut file = IrFile::new("main", &["app"]);
        file.declarations.push(IrDecl::Function(function));
        let module = IrModuleFragment { name: "app".into(), files: vec![file] };

        let outputs = Backend::new().compile_module(module).expect("compile failed");
        let escaped = format!("void @{}()", keyword);
        let bare = format!("void {}()", keyword);
        prop_assert!(outputs[0].source.contains(&escaped));
        prop_assert!(!outputs[0].source.contains(&bare));
    }
}

#[test]
fn visibility_mapping_is_total() {
    for (visibility, keyword) in [
        (Visibility::Private, "private "),
        (Visibility::Protected, "protected "),
        (Visibility::Internal, "internal "),
        (Visibility::Public, "public "),
    ] {
        let mut class = IrClass::new(ClassKind::Class, "Probe");
        class.visibility = visibility;
        let mut file = IrFile::new("probe", &[]);
        file.declarations.push(IrDecl::Class(class));
        let module = IrModuleFragment {
            name: "app".into(),
            files: vec![file],
        };
        let outputs = Backend::new().compile_module(module).expect("compile failed");
        assert!(
            outputs[0].source.contains(&format!("{}sealed class Probe", keyword)),
            "missing {:?} header in:\n{}",
            visibility,
            outputs[0].source
        );
    }
}
