//! Error types for the lowering pipeline.
//!
//! Lowering is best-effort: a pass that meets a shape it cannot rewrite
//! leaves the node alone for the generator to mark. [`LoweringError`] is for
//! the few conditions that make the module itself unusable, and
//! [`LoweringErrors`] aggregates them so the pipeline can report every
//! problem in one pass.

use thiserror::Error;

/// A single error raised by a lowering pass.
#[derive(Debug, Clone, Error)]
pub enum LoweringError {
    #[error("ambiguous entry point: both {first} and {second} declare an eligible main function")]
    AmbiguousEntryPoint { first: String, second: String },
}

/// Collection of lowering errors from one pipeline run.
#[derive(Debug)]
pub struct LoweringErrors(pub Vec<LoweringError>);

impl LoweringErrors {
    pub fn single(error: LoweringError) -> Self {
        Self(vec![error])
    }

    /// `Some` when the vector is non-empty, `None` otherwise.
    pub fn from_vec(errors: Vec<LoweringError>) -> Option<Self> {
        if errors.is_empty() { None } else { Some(Self(errors)) }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoweringError> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&LoweringError> {
        self.0.first()
    }
}

impl std::fmt::Display for LoweringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            writeln!(f, "{} lowering errors:", self.0.len())?;
            for (i, err) in self.0.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, err)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for LoweringErrors {}

impl From<LoweringError> for LoweringErrors {
    fn from(e: LoweringError) -> Self {
        LoweringErrors::single(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(LoweringErrors::from_vec(Vec::new()).is_none());
        let errors = LoweringErrors::from_vec(vec![LoweringError::AmbiguousEntryPoint {
            first: "main".into(),
            second: "app".into(),
        }]);
        assert_eq!(errors.map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_multi_error_display_numbers_entries() {
        let error = LoweringError::AmbiguousEntryPoint {
            first: "main".into(),
            second: "app".into(),
        };
        let errors = LoweringErrors(vec![error.clone(), error]);
        let text = errors.to_string();
        assert!(text.starts_with("2 lowering errors:"));
        assert!(text.contains("  1: "));
        assert!(text.contains("  2: "));
    }
}
