//! End-to-end backend pipeline: lowering, then per-file generation.
//!
//! The host driver hands a module to [`Backend::compile_module`] and gets
//! back one rendered C# unit per input file. Lowering runs to completion for
//! the whole module before any generation begins; the two phases are never
//! interleaved. Writing output to storage is the host's job.

use thiserror::Error;

use crate::codegen::{CsEmitter, EmitError, render};
use crate::ir::IrModuleFragment;
use crate::lower::{self, LoweringErrors};
use crate::mapping::{ClrTypeMapper, TypeMapper};

/// Failure of a whole-module compilation.
///
/// Per-declaration problems never show up here: unsupported constructs
/// degrade to placeholder comments in the output. This error means either
/// the module itself is unusable (lowering) or a generator invariant was
/// violated (emission).
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Lowering(#[from] LoweringErrors),
    #[error(transparent)]
    Emission(#[from] EmitError),
}

/// One rendered output unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFile {
    /// Output file name (`<input stem>.cs`).
    pub name: String,
    pub source: String,
}

/// The IR → C# backend.
pub struct Backend<M: TypeMapper = ClrTypeMapper> {
    types: M,
}

impl Backend {
    pub fn new() -> Self {
        Self {
            types: ClrTypeMapper::new(),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TypeMapper> Backend<M> {
    /// Build a backend with a host-supplied type-mapping service.
    pub fn with_types(types: M) -> Self {
        Self { types }
    }

    /// Compile one module to C# source, one unit per input file.
    #[tracing::instrument(skip_all, fields(module = %module.name, file_count = module.files.len()))]
    pub fn compile_module(&self, module: IrModuleFragment) -> Result<Vec<CompiledFile>, GenerationError> {
        let module = lower::lower_module(module)?;
        let emitter = CsEmitter::new(&self.types);
        let mut outputs = Vec::with_capacity(module.files.len());
        for file in &module.files {
            let document = emitter.emit_file(file)?;
            outputs.push(CompiledFile {
                name: format!("{}.cs", file.name),
                source: render(&document),
            });
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrBody, IrDecl, IrFile, IrFunction, IrType};

    #[test]
    fn test_compile_module_produces_one_unit_per_file() {
        let mut main = IrFunction::new("main", IrType::Unit);
        main.body = Some(IrBody::default());
        let mut file = IrFile::new("main", &["app"]);
        file.declarations.push(IrDecl::Function(main));
        let module = IrModuleFragment {
            name: "app".into(),
            files: vec![file, IrFile::new("empty", &["app"])],
        };

        let outputs = Backend::new().compile_module(module).unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].name, "main.cs");
        assert!(outputs[0].source.contains("namespace app"));
        assert!(outputs[0].source.contains("static class MainKt"));
        assert!(outputs[0].source.contains("Main(string[] args)"));
    }
}
