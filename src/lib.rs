#![forbid(unsafe_code)]
//! Kotlin/CLR Compiler Backend
//!
//! This crate is the CLR back end of a Kotlin cross-compiler: it consumes
//! the typed IR produced by the front end and emits C# source text, one unit
//! per input file. The stages are lowering (fixed-order IR normalization
//! passes), generation (IR → layout document) and rendering (layout document
//! → indented text).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`; never `.unwrap()` or `.expect()`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Unsupported input**: an IR shape with no translation rule is *not* a panic and not an error — it degrades to a
//!   visible placeholder comment in the output and generation continues with sibling nodes.

pub mod codegen;
pub mod ir;
pub mod lower;
pub mod mapping;
pub mod pipeline;

pub use codegen::{CodeNode, CsEmitter, EmitError, render};
pub use lower::{LoweringError, LoweringErrors, lower_module};
pub use mapping::{ClrTypeMapper, TypeMapper};
pub use pipeline::{Backend, CompiledFile, GenerationError};
