//! Emit C# source from lowered IR.
//!
//! This module wires together the focused submodules that implement
//! IR → C# generation. The heavy lifting lives in those submodules; `mod.rs`
//! is intentionally thin.
//!
//! - [`node`]: the layout document model generation builds
//! - [`decls`]: declaration generation (files, classes, members)
//! - [`expr`]: statement/expression generation, including call resolution and
//!   the dual-mode conditional translation
//! - [`render`]: layout document → indented text
//!
//! ## Error policy
//!
//! Unsupported IR shapes are not errors: they become
//! [`node::CodeNode::Unsupported`] placeholders and generation continues with
//! sibling nodes. [`EmitError`] is reserved for invariants the lowering
//! passes were supposed to guarantee — hitting one means the phase pipeline
//! itself is broken.

pub mod decls;
pub mod expr;
pub mod node;
pub mod render;

pub use node::CodeNode;
pub use render::render;

use thiserror::Error;

use crate::mapping::TypeMapper;

/// Invariant violations during emission (lowering-pass defects, not
/// user-facing unsupported constructs).
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("property must have either getter or setter: {property}")]
    PropertyWithoutAccessor { property: String },
}

/// Emit C# layout documents from lowered IR.
///
/// Borrows the type-mapping service for the duration of a generation pass;
/// carries no other state, so one emitter can serve every file of a module.
pub struct CsEmitter<'a> {
    pub(crate) types: &'a dyn TypeMapper,
}

impl<'a> CsEmitter<'a> {
    pub fn new(types: &'a dyn TypeMapper) -> Self {
        Self { types }
    }
}
