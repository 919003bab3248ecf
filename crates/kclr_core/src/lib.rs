//! Provide shared, pure vocabulary for the kclr backend.
//!
//! This crate is intentionally small and dependency-light. It contains the
//! canonical C# keyword list and the CLR attribute/runtime names that both:
//! - the code generator uses when emitting declarations and calls, and
//! - tests use to assert on emitted markers without duplicating literals.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, and no
//!   compiler-specific types.

pub mod clr;
pub mod csharp_keywords;
