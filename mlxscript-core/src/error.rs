//! Error types for the filter script model

use crate::param::ParamKind;
use thiserror::Error;

/// Errors raised by the filter script data model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("duplicate parameter '{param}' in filter '{filter}'")]
    DuplicateParam { filter: String, param: String },

    #[error("filter '{filter}' has no parameter '{param}'")]
    MissingParam { filter: String, param: String },

    #[error("parameter '{param}' has type {found}, expected {expected}")]
    TypeMismatch {
        param: String,
        expected: ParamKind,
        found: ParamKind,
    },

    #[error("expected filter '{expected}', found '{found}'")]
    WrongFilter { expected: String, found: String },
}
