//! Typed Intermediate Representation (IR)
//!
//! This module defines the typed IR the front end hands to the backend. The
//! IR is:
//!
//! - **Typed**: every expression carries its resolved type
//! - **Resolved**: calls carry their callee's name, owner and dispatch flags
//! - **Read-mostly**: only the lowering passes mutate it, before any
//!   generation begins
//!
//! ## Pipeline
//!
//! ```text
//! front-end IR → lowering passes → C# layout document → rendered text
//! ```
//!
//! Every enum here is closed: adding a node kind is a compile-time-checked,
//! single-site change in the generator's exhaustive matches.

pub mod decl;
pub mod expr;
pub mod name;
pub mod stmt;
pub mod types;

pub use decl::{
    ClassRef, IrAccessor, IrBody, IrClass, IrConstructor, IrDecl, IrFile, IrFunction, IrModuleFragment, IrParameter,
    IrProperty, IrTypeParameter, IrVariable,
};
pub use expr::{Callee, CalleeOwner, ConstValue, IrBranch, IrCall, IrExpr, IrExprKind, IrWhen};
pub use name::{AccessorKind, Name, SpecialName};
pub use stmt::IrStmt;
pub use types::{ClassKind, IrType, Modality, PrimitiveType, Visibility};
