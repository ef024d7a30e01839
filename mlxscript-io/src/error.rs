//! Error types for filter script documents

use mlxscript_core::ParamKind;
use thiserror::Error;

/// Errors that can occur while reading a filter script document.
///
/// Structural failures (unparseable markup, wrong document shape), schema
/// failures (missing required attributes, duplicate parameters) and type
/// failures (bad literals, unknown type tokens) are distinct variants, each
/// carrying the offending name and the 1-based line it was found on.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("document does not declare the FilterScript doctype")]
    MissingDoctype,

    #[error("unexpected doctype '{found}', expected FilterScript")]
    WrongDoctype { found: String },

    #[error("unexpected element <{element}> at line {line}")]
    UnexpectedElement { element: String, line: usize },

    #[error("missing required attribute '{attribute}' on <{element}> at line {line}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        line: usize,
    },

    #[error("duplicate parameter '{param}' in filter '{filter}' at line {line}")]
    DuplicateParam {
        filter: String,
        param: String,
        line: usize,
    },

    #[error("unknown parameter type '{token}' at line {line}")]
    UnknownParamType { token: String, line: usize },

    #[error("invalid {kind} value '{value}' for parameter '{param}' at line {line}")]
    InvalidValue {
        param: String,
        kind: ParamKind,
        value: String,
        line: usize,
    },

    #[error("{0}")]
    Model(#[from] mlxscript_core::Error),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, ParseError>;
