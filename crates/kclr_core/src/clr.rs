//! Canonical CLR attribute and runtime names emitted by the backend.
//!
//! The generated C# links against a small hand-written `kotlin.*` runtime.
//! These constants are the single source of truth for the names that runtime
//! exposes; codegen and tests must both go through them.

/// Attribute attached to every synthesized file-container class so CLR
/// tooling can recognize Kotlin file facades.
pub const FILE_CLASS_ATTRIBUTE: &str = "[global::kotlin.clr.KotlinFileClass]";

/// Attribute attached to functions compiled from Kotlin extension functions.
/// The receiver is rendered as a leading ordinary parameter.
pub const EXTENSION_ATTRIBUTE: &str = "[global::kotlin.clr.KotlinExtension]";

/// Attribute for functions whose Kotlin return type is `Nothing`.
pub const DOES_NOT_RETURN_ATTRIBUTE: &str =
    "[global::System.Diagnostics.CodeAnalysis.DoesNotReturnAttribute]";

/// Base class for compiled annotation classes.
pub const ATTRIBUTE_BASE: &str = "global::System.Attribute";

/// Adapter wrapping a native `IEnumerator<T>` behind the Kotlin iterator
/// protocol (`hasNext`/`next`).
pub const ITERATOR_ADAPTER: &str = "global::kotlin.collections.KotlinIterator";

/// Delegate type used to give value-producing conditionals a C# encoding.
pub const FUNC_TYPE: &str = "global::System.Func";

/// Package that owns the front end's synthetic comparison intrinsics.
pub const INTRINSIC_PACKAGE: &str = "kotlin.internal.ir";

/// Package holding the runtime range/progression types targeted by built-in
/// lowering.
pub const RANGES_PACKAGE: [&str; 2] = ["kotlin", "ranges"];
