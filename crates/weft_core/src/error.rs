//! Error types for the styling engine.

use weft_compiler::CompileError;

/// Errors surfaced by public styling operations.
///
/// The engine itself is error-tolerant: absent or malformed values
/// serialize to empty text instead of failing. The only failure mode is
/// structurally malformed rule text reaching the compiler, which is
/// reported unchanged. A failed operation leaves the insertion cache
/// unmarked, so a corrected retry performs the insertion.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The rule compiler rejected the serialized style text.
    #[error("rule compilation failed: {0}")]
    Compile(#[from] CompileError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_display() {
        let err = StyleError::from(CompileError::UnbalancedBlock { position: 3 });
        assert_eq!(
            err.to_string(),
            "rule compilation failed: unbalanced block at byte 3"
        );
    }
}
