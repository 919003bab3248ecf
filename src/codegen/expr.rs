//! Statement and expression generation.
//!
//! Call resolution dispatches on the kind of declaration that owns the
//! called function (class member, external-package intrinsic, unresolved).
//! Conditionals translate in two modes: statement mode renders `Conditional`
//! chains, value mode renders `ConditionalValue` chains whose arms always
//! produce a value (see `emit_when_value`).

use kclr_core::clr;
use kclr_core::csharp_keywords;

use crate::ir::{
    AccessorKind, CalleeOwner, ClassRef, ConstValue, IrBranch, IrCall, IrExpr, IrExprKind, IrStmt, IrWhen, Name,
    SpecialName,
};

use super::node::{CodeNode, fragment, join, line, line_list, lines, stmt_block, unsupported};
use super::CsEmitter;

impl CsEmitter<'_> {
    pub(crate) fn emit_statements(&self, statements: &[IrStmt]) -> Vec<CodeNode> {
        statements.iter().filter_map(|s| self.emit_stmt(s)).collect()
    }

    /// Generate one statement. Delegating-constructor and instance-initializer
    /// calls are bookkeeping, not statements; they emit nothing here.
    pub(crate) fn emit_stmt(&self, stmt: &IrStmt) -> Option<CodeNode> {
        match stmt {
            IrStmt::Expr(expr) => self.emit_expr_stmt(expr),
            IrStmt::Variable(variable) => Some(self.emit_variable(variable).append_line(vec![fragment(";")])),
        }
    }

    /// An expression in statement position: conditionals and loops carry
    /// their own layout, everything else gets a `;` terminator.
    fn emit_expr_stmt(&self, expr: &IrExpr) -> Option<CodeNode> {
        match &expr.kind {
            IrExprKind::DelegatingConstructorCall { .. } | IrExprKind::InstanceInitializerCall => None,
            IrExprKind::When(when) => Some(self.emit_when(when)),
            IrExprKind::While { .. } => Some(self.emit_expr(expr)),
            _ => Some(line(vec![self.emit_expr(expr), fragment(";")])),
        }
    }

    pub(crate) fn emit_expr(&self, expr: &IrExpr) -> CodeNode {
        match &expr.kind {
            IrExprKind::Const(value) => emit_const(value),
            IrExprKind::Call(call) => self.emit_call(call),
            IrExprKind::ConstructorCall { class, arguments } => self.emit_constructor_call(class, arguments),
            IrExprKind::DelegatingConstructorCall { arguments } => self.emit_delegating_call(arguments),
            IrExprKind::InstanceInitializerCall => {
                unsupported("expression: instance initializer call", "emit_expr", vec![])
            }
            IrExprKind::GetValue(name) => self.emit_value_name(name),
            IrExprKind::SetValue { target, value } => line_list(vec![
                self.emit_value_name(target),
                fragment(" = "),
                self.emit_expr_value(value),
            ]),
            IrExprKind::GetObject(class) => line_list(vec![
                fragment(self.types.map_type(&class.default_type())),
                fragment(".INSTANCE"),
            ]),
            IrExprKind::Return(value) => line_list(vec![fragment("return "), self.emit_expr_value(value)]),
            IrExprKind::When(when) => self.emit_when(when),
            IrExprKind::Block(statements) => lines(self.emit_statements(statements)),
            IrExprKind::StringConcat(parts) => {
                CodeNode::StringJoin(parts.iter().map(|p| self.emit_expr_value(p)).collect())
            }
            IrExprKind::Vararg(elements) => {
                line_list(join(elements.iter().map(|e| self.emit_expr_value(e)).collect(), ", "))
            }
            IrExprKind::While { condition, body } => lines(vec![
                line(vec![fragment("while ("), self.emit_expr_value(condition), fragment(")")]),
                stmt_block(self.emit_statements(body)),
            ]),
        }
    }

    /// Generate an expression whose value is consumed. Only conditionals
    /// differ from statement position: they switch to value mode, typed with
    /// the conditional's own result type.
    pub(crate) fn emit_expr_value(&self, expr: &IrExpr) -> CodeNode {
        match &expr.kind {
            IrExprKind::When(when) => self.emit_when_value(when, &self.types.map_type(&expr.ty)),
            _ => self.emit_expr(expr),
        }
    }

    // ------------------------------------------------------------------
    // Call resolution
    // ------------------------------------------------------------------

    fn emit_call(&self, call: &IrCall) -> CodeNode {
        match &call.callee.owner {
            CalleeOwner::Class(owner) => self.emit_member_call(call, owner),
            CalleeOwner::ExternalPackage(package) => self.emit_intrinsic_call(call, package),
            CalleeOwner::UnresolvedModule(module) => unsupported(
                format!("call into unresolved module: {}", module),
                "emit_call",
                vec![call.callee.name.describe()],
            ),
        }
    }

    fn emit_member_call(&self, call: &IrCall, owner: &ClassRef) -> CodeNode {
        let callee = &call.callee;
        if callee.is_static {
            let target = fragment(self.types.map_type(&owner.default_type()));
            self.emit_member_access(target, call, "is static")
        } else if callee.is_clr_static {
            match &owner.outer {
                Some(outer) => {
                    let target = fragment(self.types.map_type(&outer.default_type()));
                    self.emit_member_access(target, call, "is companion static")
                }
                None => unsupported(
                    "companion-static member without enclosing class",
                    "emit_member_call",
                    vec![callee.name.describe()],
                ),
            }
        } else if callee.is_operator {
            self.emit_operator_call(call)
        } else {
            match &call.dispatch_receiver {
                Some(receiver) => {
                    let target = self.emit_expr_value(receiver);
                    self.emit_member_access(target, call, "is instance")
                }
                None => unsupported(
                    "instance call without dispatch receiver",
                    "emit_member_call",
                    vec![callee.name.describe()],
                ),
            }
        }
    }

    /// `target.member(args)` — or plain property syntax when the callee is a
    /// synthesized accessor.
    fn emit_member_access(&self, target: CodeNode, call: &IrCall, context: &'static str) -> CodeNode {
        match &call.callee.name {
            Name::Special(SpecialName::Accessor(AccessorKind::Set, property)) => match call.arguments.first() {
                Some(value) => line_list(vec![
                    target,
                    fragment(format!(".{} = ", csharp_keywords::escape_identifier(property))),
                    self.emit_expr_value(value),
                ]),
                None => unsupported(
                    format!("setter call without argument: {}", call.callee.name.describe()),
                    "emit_member_access",
                    vec![context.to_string()],
                ),
            },
            Name::Special(SpecialName::Accessor(AccessorKind::Get, property)) => line_list(vec![
                target,
                fragment(format!(".{}", csharp_keywords::escape_identifier(property))),
            ]),
            Name::Special(other) => unsupported(
                format!("special name: {}", Name::Special(other.clone()).describe()),
                "emit_member_access",
                vec![context.to_string()],
            ),
            Name::Ident(name) => {
                let mut nodes = vec![
                    target,
                    fragment(format!(".{}(", csharp_keywords::escape_identifier(name))),
                ];
                nodes.extend(join(self.emit_call_arguments(call), ", "));
                nodes.push(fragment(")"));
                line_list(nodes)
            }
        }
    }

    /// Extension receiver first, then ordinary arguments, all value-mode.
    fn emit_call_arguments(&self, call: &IrCall) -> Vec<CodeNode> {
        let mut args = Vec::new();
        if let Some(receiver) = &call.extension_receiver {
            args.push(self.emit_expr_value(receiver));
        }
        for argument in &call.arguments {
            args.push(self.emit_expr_value(argument));
        }
        args
    }

    /// Operator-tagged member functions: arithmetic maps to native infix,
    /// the iteration protocol maps to the runtime adapter type.
    fn emit_operator_call(&self, call: &IrCall) -> CodeNode {
        let Name::Ident(name) = &call.callee.name else {
            return unsupported(
                format!("operator with special name: {}", call.callee.name.describe()),
                "emit_operator_call",
                vec![],
            );
        };
        match name.as_str() {
            "plus" => self.emit_infix(call, " + "),
            "times" => self.emit_infix(call, " * "),
            "iterator" => self.emit_iterator_adapter(call),
            "hasNext" | "next" => match &call.dispatch_receiver {
                Some(receiver) => {
                    let mut nodes = vec![
                        self.emit_expr_value(receiver),
                        fragment(format!(".{}(", name)),
                    ];
                    nodes.extend(join(self.emit_call_arguments(call), ", "));
                    nodes.push(fragment(")"));
                    line_list(nodes)
                }
                None => unsupported(
                    format!("iteration call without receiver: {}", name),
                    "emit_operator_call",
                    vec![],
                ),
            },
            other => unsupported(
                format!("operator: {}", other),
                "emit_operator_call",
                vec![call.callee.name.describe()],
            ),
        }
    }

    fn emit_infix(&self, call: &IrCall, operator: &str) -> CodeNode {
        let (Some(receiver), Some(argument)) = (&call.dispatch_receiver, call.arguments.first()) else {
            return unsupported(
                format!("infix operator missing operand: {}", call.callee.name.describe()),
                "emit_infix",
                vec![],
            );
        };
        line_list(vec![
            fragment("("),
            self.emit_expr_value(receiver),
            fragment(")"),
            fragment(operator),
            fragment("("),
            self.emit_expr_value(argument),
            fragment(")"),
        ])
    }

    /// `iterator()` wraps the receiver's native enumerator in the runtime
    /// adapter; the element type comes from the receiver's single type
    /// argument.
    fn emit_iterator_adapter(&self, call: &IrCall) -> CodeNode {
        let Some(receiver) = &call.dispatch_receiver else {
            return unsupported("iterator call without receiver", "emit_iterator_adapter", vec![]);
        };
        let Some(element) = receiver.ty.single_argument() else {
            return unsupported(
                "iterator receiver without a single element type",
                "emit_iterator_adapter",
                vec![format!("receiver type: {:?}", receiver.ty)],
            );
        };
        line_list(vec![
            fragment(format!("new {}<{}>(", clr::ITERATOR_ADAPTER, self.types.map_type(element))),
            self.emit_expr_value(receiver),
            fragment(".GetEnumerator())"),
        ])
    }

    /// Calls owned by an already-compiled module resolve through a fixed
    /// table keyed on (package, function name).
    fn emit_intrinsic_call(&self, call: &IrCall, package: &str) -> CodeNode {
        if package != clr::INTRINSIC_PACKAGE {
            return unsupported(
                format!("external package: {}", package),
                "emit_intrinsic_call",
                vec![call.callee.name.describe()],
            );
        }
        match &call.callee.name {
            Name::Ident(name) if name == "greater" => {
                let (Some(lhs), Some(rhs)) = (call.arguments.first(), call.arguments.get(1)) else {
                    return unsupported(
                        "greater intrinsic without two arguments",
                        "emit_intrinsic_call",
                        vec![],
                    );
                };
                line_list(vec![
                    fragment("("),
                    self.emit_expr_value(lhs),
                    fragment(")"),
                    fragment(" > "),
                    fragment("("),
                    self.emit_expr_value(rhs),
                    fragment(")"),
                ])
            }
            other => unsupported(
                format!("intrinsic in {}: {}", clr::INTRINSIC_PACKAGE, other.describe()),
                "emit_intrinsic_call",
                vec![],
            ),
        }
    }

    /// `new global::Fully.Qualified.Name(args)`, qualified by the constructed
    /// class's package path.
    fn emit_constructor_call(&self, class: &ClassRef, arguments: &[IrExpr]) -> CodeNode {
        let mut qualified = String::from("new global::");
        for segment in &class.package {
            qualified.push_str(segment);
            qualified.push('.');
        }
        qualified.push_str(&class.name);
        qualified.push('(');

        let mut nodes = vec![fragment(qualified)];
        nodes.extend(join(arguments.iter().map(|a| self.emit_expr_value(a)).collect(), ", "));
        nodes.push(fragment(")"));
        line_list(nodes)
    }

    pub(crate) fn emit_delegating_call(&self, arguments: &[IrExpr]) -> CodeNode {
        let mut nodes = vec![fragment("base(")];
        nodes.extend(join(arguments.iter().map(|a| self.emit_expr_value(a)).collect(), ", "));
        nodes.push(fragment(")"));
        line_list(nodes)
    }

    fn emit_value_name(&self, name: &Name) -> CodeNode {
        match name.mangled() {
            Some(text) => fragment(text),
            None => unsupported(format!("value name: {}", name.describe()), "emit_value_name", vec![]),
        }
    }

    // ------------------------------------------------------------------
    // Dual-mode conditionals
    // ------------------------------------------------------------------

    /// Statement mode: a chain of `Conditional` nodes. The last branch with
    /// no condition is the else-arm; a branch list with a single trailing arm
    /// collapses to a plain if/else.
    pub(crate) fn emit_when(&self, when: &IrWhen) -> CodeNode {
        self.emit_branches(&when.branches)
    }

    fn emit_branches(&self, branches: &[IrBranch]) -> CodeNode {
        let Some((first, rest)) = branches.split_first() else {
            return CodeNode::Empty;
        };
        let Some(condition) = &first.condition else {
            // A leading else-arm degenerates to its own body.
            return stmt_block(self.branch_statements(&first.result));
        };
        let else_branch = match rest {
            [] => CodeNode::Empty,
            [last] if last.condition.is_none() => stmt_block(self.branch_statements(&last.result)),
            _ => self.emit_branches(rest),
        };
        CodeNode::Conditional {
            condition: Box::new(self.emit_expr_value(condition)),
            then_branch: Box::new(stmt_block(self.branch_statements(&first.result))),
            else_branch: Box::new(else_branch),
        }
    }

    fn branch_statements(&self, result: &IrExpr) -> Vec<CodeNode> {
        match &result.kind {
            IrExprKind::Block(statements) => self.emit_statements(statements),
            _ => self.emit_expr_stmt(result).into_iter().collect(),
        }
    }

    /// Value mode: a chain of `ConditionalValue` nodes whose arms each end in
    /// an explicit `return`. Multi-statement block arms keep every statement
    /// except the last verbatim; the last is rewritten with a `return`
    /// prefix. Single-expression arms become a one-statement return block.
    pub(crate) fn emit_when_value(&self, when: &IrWhen, type_text: &str) -> CodeNode {
        self.emit_branches_value(&when.branches, type_text)
    }

    fn emit_branches_value(&self, branches: &[IrBranch], type_text: &str) -> CodeNode {
        let Some((first, rest)) = branches.split_first() else {
            return unsupported("conditional with no branches", "emit_branches_value", vec![]);
        };
        let condition = match &first.condition {
            Some(condition) => self.emit_expr_value(condition),
            // A leading else-arm is always taken.
            None => fragment("true"),
        };
        let else_arm = match rest {
            [] => unsupported(
                "value-producing conditional without else branch",
                "emit_branches_value",
                vec![],
            ),
            [last] if last.condition.is_none() => self.value_arm(&last.result),
            _ => stmt_block(vec![line(vec![
                fragment("return "),
                self.emit_branches_value(rest, type_text),
                fragment(";"),
            ])]),
        };
        CodeNode::ConditionalValue {
            condition: Box::new(condition),
            then_branch: Box::new((self.value_arm(&first.result), type_text.to_string())),
            else_branch: Box::new((else_arm, type_text.to_string())),
        }
    }

    fn value_arm(&self, result: &IrExpr) -> CodeNode {
        match &result.kind {
            IrExprKind::Block(statements) => {
                let mut nodes = self.emit_statements(statements);
                match nodes.pop() {
                    Some(last) => nodes.push(last.push_line(vec![fragment("return ")])),
                    None => nodes.push(unsupported(
                        "value-producing arm with empty block",
                        "value_arm",
                        vec![],
                    )),
                }
                stmt_block(nodes)
            }
            _ => stmt_block(vec![line(vec![
                fragment("return "),
                self.emit_expr_value(result),
                fragment(";"),
            ])]),
        }
    }
}

fn emit_const(value: &ConstValue) -> CodeNode {
    match value {
        ConstValue::Str(text) => fragment(format!("\"{}\"", escape_string(text))),
        ConstValue::Char(c) => fragment(format!("'{}'", escape_char(*c))),
        ConstValue::Int(n) => fragment(n.to_string()),
        ConstValue::Double(d) => fragment(d.to_string()),
        ConstValue::Boolean(b) => fragment(b.to_string()),
        ConstValue::Null => fragment("null"),
    }
}

fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        other => other.to_string(),
    }
}
