//! Filter entries of a script

use crate::param::{Param, ParamKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single filter invocation: a name known to the consuming tool plus an
/// ordered list of typed parameters.
///
/// Parameter names are unique within a filter; the parameter list is kept
/// private so that invariant holds for every constructed value. Whether the
/// filter *name* is one the consuming tool recognizes is that tool's concern,
/// not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    params: Vec<Param>,
}

impl Filter {
    /// Create a filter with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Create a filter from an ordered parameter list
    pub fn with_params(name: impl Into<String>, params: Vec<Param>) -> Result<Self> {
        let mut filter = Self::new(name);
        for param in params {
            filter.push_param(param)?;
        }
        Ok(filter)
    }

    /// Constructor for parameter lists already known to have unique names
    pub(crate) fn from_unique_params(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Append a parameter, rejecting duplicate names
    pub fn push_param(&mut self, param: Param) -> Result<()> {
        if self.params.iter().any(|p| p.name == param.name) {
            return Err(Error::DuplicateParam {
                filter: self.name.clone(),
                param: param.name,
            });
        }
        self.params.push(param);
        Ok(())
    }

    /// The parameters in document order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Get the number of parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Integer value of a parameter
    pub fn int(&self, name: &str) -> Result<i32> {
        let param = self.require(name)?;
        param.value.as_int().ok_or_else(|| Error::TypeMismatch {
            param: name.to_string(),
            expected: ParamKind::Int,
            found: param.kind(),
        })
    }

    /// Floating point value of a parameter (integers widen)
    pub fn float(&self, name: &str) -> Result<f32> {
        let param = self.require(name)?;
        param.value.as_float().ok_or_else(|| Error::TypeMismatch {
            param: name.to_string(),
            expected: ParamKind::Float,
            found: param.kind(),
        })
    }

    /// Boolean value of a parameter
    pub fn boolean(&self, name: &str) -> Result<bool> {
        let param = self.require(name)?;
        param.value.as_bool().ok_or_else(|| Error::TypeMismatch {
            param: name.to_string(),
            expected: ParamKind::Bool,
            found: param.kind(),
        })
    }

    /// String value of a parameter
    pub fn string(&self, name: &str) -> Result<&str> {
        let param = self.require(name)?;
        param.value.as_str().ok_or_else(|| Error::TypeMismatch {
            param: name.to_string(),
            expected: ParamKind::String,
            found: param.kind(),
        })
    }

    fn require(&self, name: &str) -> Result<&Param> {
        self.param(name).ok_or_else(|| Error::MissingParam {
            filter: self.name.clone(),
            param: name.to_string(),
        })
    }
}
