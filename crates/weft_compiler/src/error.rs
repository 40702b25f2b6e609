//! Error types for rule compilation.

/// Errors produced while parsing rule text.
///
/// The compiler is otherwise tolerant: unknown properties, odd selectors,
/// and vendor syntax all pass through as literal text. Only structural
/// problems that make block boundaries ambiguous are reported.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A block was opened but never closed, or a stray `}` was found.
    #[error("unbalanced block at byte {position}")]
    UnbalancedBlock {
        /// Byte offset of the offending brace or of end-of-input.
        position: usize,
    },

    /// A quoted string reached end-of-input without a closing quote.
    #[error("unterminated string starting at byte {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbalanced_block_display() {
        let err = CompileError::UnbalancedBlock { position: 12 };
        assert_eq!(err.to_string(), "unbalanced block at byte 12");
    }

    #[test]
    fn unterminated_string_display() {
        let err = CompileError::UnterminatedString { position: 4 };
        assert!(err.to_string().contains("byte 4"));
    }
}
