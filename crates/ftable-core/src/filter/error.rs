//! Error types for the token parser.

use thiserror::Error;

/// A specialized Result type for token parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing a textual token.
///
/// Evaluation itself never fails; these only arise when turning user input
/// such as `requests>=5000` into a [`Token`](super::Token).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The token text is empty.
    #[error("filter token is empty")]
    EmptyExpression,

    /// No operator symbol was found.
    #[error("missing operator in '{token}' (expected one of = != : !: ^ !^ > >= < <=)")]
    MissingOperator {
        /// The offending token text.
        token: String,
    },

    /// The operator has nothing on its left.
    #[error("missing property key in '{token}'")]
    MissingPropertyKey {
        /// The offending token text.
        token: String,
    },

    /// The operator symbol is not recognized.
    #[error("unknown operator: {operator}")]
    UnknownOperator {
        /// The unrecognized symbol.
        operator: String,
    },
}

impl FilterError {
    /// Creates a missing operator error.
    pub fn missing_operator(token: impl Into<String>) -> Self {
        FilterError::MissingOperator {
            token: token.into(),
        }
    }

    /// Creates a missing property key error.
    pub fn missing_property_key(token: impl Into<String>) -> Self {
        FilterError::MissingPropertyKey {
            token: token.into(),
        }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(operator: impl Into<String>) -> Self {
        FilterError::UnknownOperator {
            operator: operator.into(),
        }
    }
}
