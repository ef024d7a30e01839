//! Typed filter parameters
//!
//! Every parameter in a filter script declares one of a closed set of type
//! tokens (`RichInt`, `RichFloat`, ...) and carries a value whose literal
//! grammar depends on that token. The richer kinds also carry sibling data
//! saved alongside the value: the label set of an enum, the admissible range
//! of an absolute/percentage value, the four channels of a color.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of parameter type tokens understood by the format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    Int,
    Float,
    Bool,
    String,
    Enum,
    AbsPerc,
    Color,
}

impl ParamKind {
    /// Resolve a document type token such as `RichInt` into a kind.
    ///
    /// Returns `None` for tokens outside the closed set; callers treat that
    /// as a type error rather than defaulting.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "RichInt" => Some(ParamKind::Int),
            "RichFloat" => Some(ParamKind::Float),
            "RichBool" => Some(ParamKind::Bool),
            "RichString" => Some(ParamKind::String),
            "RichEnum" => Some(ParamKind::Enum),
            "RichAbsPerc" => Some(ParamKind::AbsPerc),
            "RichColor" => Some(ParamKind::Color),
            _ => None,
        }
    }

    /// The type token written to documents for this kind
    pub fn token(&self) -> &'static str {
        match self {
            ParamKind::Int => "RichInt",
            ParamKind::Float => "RichFloat",
            ParamKind::Bool => "RichBool",
            ParamKind::String => "RichString",
            ParamKind::Enum => "RichEnum",
            ParamKind::AbsPerc => "RichAbsPerc",
            ParamKind::Color => "RichColor",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A typed parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    /// Selected index into the label set offered by the consuming tool
    Enum { index: i32, items: Vec<String> },
    /// Absolute value constrained to the tool-provided `[min, max]` range
    AbsPerc { value: f32, min: f32, max: f32 },
    /// RGBA color, one byte per channel
    Color { r: u8, g: u8, b: u8, a: u8 },
}

impl ParamValue {
    /// The kind this value instantiates
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Enum { .. } => ParamKind::Enum,
            ParamValue::AbsPerc { .. } => ParamKind::AbsPerc,
            ParamValue::Color { .. } => ParamKind::Color,
        }
    }

    /// Extract an integer value
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a floating point value, widening integers
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::AbsPerc { value, .. } => Some(*value),
            ParamValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Extract a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The literal form of the `value` attribute for this value.
    ///
    /// Colors have no single literal; their channels are serialized as
    /// separate attributes and this returns `None`.
    pub fn literal(&self) -> Option<String> {
        match self {
            ParamValue::Int(v) => Some(v.to_string()),
            ParamValue::Float(v) => Some(v.to_string()),
            ParamValue::Bool(v) => Some(v.to_string()),
            ParamValue::String(s) => Some(s.clone()),
            ParamValue::Enum { index, .. } => Some(index.to_string()),
            ParamValue::AbsPerc { value, .. } => Some(value.to_string()),
            ParamValue::Color { .. } => None,
        }
    }
}

/// A named, typed parameter of a filter
///
/// `description` is the short human label the tool shows next to the widget;
/// `tooltip` is the longer help text and may contain markup that the document
/// layer escapes on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
    pub description: String,
    pub tooltip: String,
}

impl Param {
    /// Create a parameter with empty description and tooltip
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
            description: String::new(),
            tooltip: String::new(),
        }
    }

    /// Set the human-readable label
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the help text
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// The declared kind of this parameter
    pub fn kind(&self) -> ParamKind {
        self.value.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_token_roundtrip() {
        let kinds = [
            ParamKind::Int,
            ParamKind::Float,
            ParamKind::Bool,
            ParamKind::String,
            ParamKind::Enum,
            ParamKind::AbsPerc,
            ParamKind::Color,
        ];
        for kind in kinds {
            assert_eq!(ParamKind::from_token(kind.token()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert_eq!(ParamKind::from_token("RichMatrix44f"), None);
        assert_eq!(ParamKind::from_token("richint"), None);
        assert_eq!(ParamKind::from_token(""), None);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(ParamValue::Int(1000).as_int(), Some(1000));
        assert_eq!(ParamValue::Int(1000).as_float(), Some(1000.0));
        assert_eq!(ParamValue::Float(0.3).as_float(), Some(0.3));
        assert_eq!(ParamValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ParamValue::Float(0.3).as_bool(), None);
        assert_eq!(
            ParamValue::String("a.ply".to_string()).as_str(),
            Some("a.ply")
        );
        let abs = ParamValue::AbsPerc {
            value: 0.5,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(abs.as_float(), Some(0.5));
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(ParamValue::Int(1000).literal().unwrap(), "1000");
        assert_eq!(ParamValue::Float(0.3).literal().unwrap(), "0.3");
        assert_eq!(ParamValue::Float(1.0).literal().unwrap(), "1");
        assert_eq!(ParamValue::Bool(false).literal().unwrap(), "false");
        let color = ParamValue::Color {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        };
        assert_eq!(color.literal(), None);
    }

    #[test]
    fn test_param_builder() {
        let param = Param::new("QualityThr", ParamValue::Float(0.3))
            .with_description("Quality threshold")
            .with_tooltip("Quality threshold for penalizing bad shaped faces");
        assert_eq!(param.name, "QualityThr");
        assert_eq!(param.kind(), ParamKind::Float);
        assert_eq!(param.description, "Quality threshold");
    }
}
