//! IR statement definitions.

use super::decl::IrVariable;
use super::expr::IrExpr;

/// A statement inside an executable body.
#[derive(Debug, Clone)]
pub enum IrStmt {
    /// An expression in statement position.
    Expr(IrExpr),
    /// A local variable declaration.
    Variable(IrVariable),
}
