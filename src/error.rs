// Typed errors for the resource parsers.
//
// The parsers live in the library and are used both by the CLI and by tests,
// so they report structured errors with line numbers. Command-level code
// wraps these in anyhow with file context.

/// Result type for OBO, association and input parsing.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("invalid GO id: {0:?}")]
    InvalidGoId(String),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        ParseError::Malformed {
            line,
            message: message.into(),
        }
    }
}
