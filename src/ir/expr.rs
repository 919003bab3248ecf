//! IR expression definitions.
//!
//! Expressions carry their resolved type and, for calls, the resolved callee
//! (name, owner, dispatch flags). The generator never consults a symbol table:
//! everything call resolution needs travels on the call node itself.

use super::decl::{ClassRef, IrVariable};
use super::name::Name;
use super::stmt::IrStmt;
use super::types::IrType;

/// A typed expression.
#[derive(Debug, Clone)]
pub struct IrExpr {
    pub kind: IrExprKind,
    pub ty: IrType,
}

impl IrExpr {
    pub fn new(kind: IrExprKind, ty: IrType) -> Self {
        Self { kind, ty }
    }

    /// Apply `f` to this expression and every nested expression, bottom-up.
    /// Used by the lowering passes that rewrite expressions in place.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut IrExpr)) {
        match &mut self.kind {
            IrExprKind::Const(_) | IrExprKind::GetValue(_) | IrExprKind::GetObject(_) | IrExprKind::InstanceInitializerCall => {}
            IrExprKind::Call(call) => {
                if let Some(receiver) = call.dispatch_receiver.as_mut() {
                    receiver.walk_mut(f);
                }
                if let Some(receiver) = call.extension_receiver.as_mut() {
                    receiver.walk_mut(f);
                }
                for arg in &mut call.arguments {
                    arg.walk_mut(f);
                }
            }
            IrExprKind::ConstructorCall { arguments, .. } | IrExprKind::DelegatingConstructorCall { arguments } => {
                for arg in arguments {
                    arg.walk_mut(f);
                }
            }
            IrExprKind::SetValue { value, .. } | IrExprKind::Return(value) => value.walk_mut(f),
            IrExprKind::When(when) => {
                for branch in &mut when.branches {
                    if let Some(condition) = branch.condition.as_mut() {
                        condition.walk_mut(f);
                    }
                    branch.result.walk_mut(f);
                }
            }
            IrExprKind::Block(statements) => walk_stmts_mut(statements, f),
            IrExprKind::StringConcat(parts) | IrExprKind::Vararg(parts) => {
                for part in parts {
                    part.walk_mut(f);
                }
            }
            IrExprKind::While { condition, body } => {
                condition.walk_mut(f);
                walk_stmts_mut(body, f);
            }
        }
        f(self);
    }
}

fn walk_stmts_mut(statements: &mut [IrStmt], f: &mut dyn FnMut(&mut IrExpr)) {
    for stmt in statements {
        match stmt {
            IrStmt::Expr(e) => e.walk_mut(f),
            IrStmt::Variable(IrVariable { initializer, .. }) => {
                if let Some(init) = initializer.as_mut() {
                    init.walk_mut(f);
                }
            }
        }
    }
}

/// Expression kinds.
#[derive(Debug, Clone)]
pub enum IrExprKind {
    Const(ConstValue),
    Call(IrCall),
    /// `new FullyQualified.Name(args)`.
    ConstructorCall {
        class: ClassRef,
        arguments: Vec<IrExpr>,
    },
    /// A call to another constructor of the same class or its supertype;
    /// only valid as a constructor's first body statement.
    DelegatingConstructorCall {
        arguments: Vec<IrExpr>,
    },
    /// Front-end bookkeeping; filtered out of rendered bodies.
    InstanceInitializerCall,
    GetValue(Name),
    SetValue {
        target: Name,
        value: Box<IrExpr>,
    },
    /// Singleton object access (`Type.INSTANCE`).
    GetObject(ClassRef),
    Return(Box<IrExpr>),
    When(IrWhen),
    Block(Vec<IrStmt>),
    /// String template, concatenated in the target.
    StringConcat(Vec<IrExpr>),
    Vararg(Vec<IrExpr>),
    While {
        condition: Box<IrExpr>,
        body: Vec<IrStmt>,
    },
}

/// A resolved call.
#[derive(Debug, Clone)]
pub struct IrCall {
    pub callee: Callee,
    pub dispatch_receiver: Option<Box<IrExpr>>,
    pub extension_receiver: Option<Box<IrExpr>>,
    pub arguments: Vec<IrExpr>,
}

/// The function a call resolves to.
#[derive(Debug, Clone)]
pub struct Callee {
    pub name: Name,
    pub owner: CalleeOwner,
    pub is_static: bool,
    /// Carries the CLR companion-static attribute (addressed through the
    /// owner's outer class).
    pub is_clr_static: bool,
    pub is_operator: bool,
}

impl Callee {
    pub fn member(owner: ClassRef, name: Name) -> Self {
        Self {
            name,
            owner: CalleeOwner::Class(owner),
            is_static: false,
            is_clr_static: false,
            is_operator: false,
        }
    }

    pub fn static_member(owner: ClassRef, name: Name) -> Self {
        Self {
            is_static: true,
            ..Self::member(owner, name)
        }
    }

    pub fn operator(owner: ClassRef, name: impl Into<String>) -> Self {
        Self {
            is_operator: true,
            ..Self::member(owner, Name::ident(name))
        }
    }
}

/// What kind of declaration owns the called function.
#[derive(Debug, Clone)]
pub enum CalleeOwner {
    /// A class in this module (or a mapped dependency).
    Class(ClassRef),
    /// An already-compiled external package; resolved through the intrinsic
    /// table.
    ExternalPackage(String),
    /// A cross-module reference the front end left dangling; repaired by the
    /// parent-patching pass.
    UnresolvedModule(String),
}

/// A single `when` branch. `condition: None` marks the else-arm.
#[derive(Debug, Clone)]
pub struct IrBranch {
    pub condition: Option<IrExpr>,
    pub result: IrExpr,
}

/// A conditional, in either statement or value position; the generator picks
/// the translation mode from context.
#[derive(Debug, Clone)]
pub struct IrWhen {
    pub branches: Vec<IrBranch>,
}

/// Compile-time constant values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Str(String),
    Char(char),
    Int(i64),
    Double(f64),
    Boolean(bool),
    Null,
}
