//! Error types for query construction and parsing.
//!
//! - [`QueryError`] for programmer errors while building a tree
//! - [`ParseError`] for malformed query text
//!
//! Missing optional input in the factory functions is neither; it yields
//! `None`.

use thiserror::Error;

/// Construction-time failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A container got a child of another category, a leaf got a nested
    /// constraint, or a query root has the wrong kind.
    #[error("Invalid construction of `{constraint}`: {reason}")]
    InvalidConstruction { constraint: String, reason: String },

    /// The value cannot be mapped to any supported literal kind.
    #[error("Unsupported value type: {value}")]
    UnsupportedValueType { value: String },

    /// Text could not be parsed as a literal of the requested kind.
    #[error("Invalid {kind} literal `{text}`: {reason}")]
    InvalidLiteral {
        kind: &'static str,
        text: String,
        reason: String,
    },
}

impl QueryError {
    pub(crate) fn invalid_construction(
        constraint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConstruction {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }
}

/// Query text failure. Only the first problem is ever reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed text
    #[error("Syntax error at line {line}, column {column}: {message} (found {found})")]
    Syntax {
        line: usize,
        column: usize,
        found: String,
        message: String,
    },

    /// Keyword not in the constraint catalog
    #[error("Unknown constraint `{keyword}` at line {line}, column {column}")]
    UnknownKeyword {
        keyword: String,
        line: usize,
        column: usize,
    },

    /// Known keyword, but its arguments match none of its shapes
    #[error("Invalid arguments for `{keyword}` at line {line}, column {column}: expected {expected}")]
    InvalidArguments {
        keyword: String,
        line: usize,
        column: usize,
        expected: String,
    },

    /// The text parsed, but to a different root production
    #[error("Expected {expected} at line {line}, column {column}, found {found}")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Position of the error as (line, column), both 1-based.
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::Syntax { line, column, .. }
            | Self::UnknownKeyword { line, column, .. }
            | Self::InvalidArguments { line, column, .. }
            | Self::UnexpectedRoot { line, column, .. } => (*line, *column),
        }
    }
}

/// Result type for construction
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message_names_token() {
        let err = ParseError::Syntax {
            line: 1,
            column: 7,
            found: "'}'".to_string(),
            message: "expected ')'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 7: expected ')' (found '}')"
        );
        assert_eq!(err.position(), (1, 7));
    }

    #[test]
    fn test_invalid_construction_message() {
        let err = QueryError::invalid_construction("and", "child `ascending` is an order constraint");
        assert!(err.to_string().contains("`and`"));
        assert!(err.to_string().contains("order constraint"));
    }
}
