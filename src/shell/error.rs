//! Shell errors

use thiserror::Error;

/// Error from evaluating a shell line
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed literal on the right-hand side of a binding
    #[error("SyntaxError: {message} (column {column})")]
    Syntax { column: usize, message: String },

    /// Name that was never bound with `let`
    #[error("ReferenceError: {0} is not defined")]
    UnknownBinding(String),

    /// Iterator handle that was never handed out
    #[error("ReferenceError: {0} is not an iterator")]
    UnknownIterator(String),

    /// Binding name that a command form or a handle already claims
    #[error("SyntaxError: {0} is reserved and cannot be bound")]
    ReservedName(String),

    /// Input that matches no command form
    #[error("unrecognized input: {0} (type `help` for commands)")]
    UnknownCommand(String),

    /// Failure inside a script, tagged with its 1-based line number
    #[error("line {line}: {error}")]
    AtLine {
        line: usize,
        #[source]
        error: Box<ShellError>,
    },

    /// Command pattern failed to compile
    #[error("invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ShellError {
    pub(crate) fn syntax(column: usize, message: impl Into<String>) -> Self {
        ShellError::Syntax {
            column,
            message: message.into(),
        }
    }
}

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
