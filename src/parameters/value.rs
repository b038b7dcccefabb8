//! Parameter values
//!
//! This module provides [`ParamValue`], the closed set of value shapes a
//! parameter can hold, along with conversions to and from plain Rust types.
//! Values serialize untagged, so a saved tree contains ordinary JSON scalars
//! and two-element arrays for ranges.

use crate::error::{ParamTreeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value held by a parameter or a plain field
///
/// Variant order matters for untagged deserialization: integers are tried
/// before floats so that `1` restores as `Int` and `1.0` as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// An inclusive `(low, high)` span, e.g. a range-slider selection
    Range(f64, f64),
}

/// The shape of a [`ParamValue`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Range,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Range => "range",
        };
        f.write_str(s)
    }
}

impl ParamValue {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamValue::Bool(_) => ValueKind::Bool,
            ParamValue::Int(_) => ValueKind::Int,
            ParamValue::Float(_) => ValueKind::Float,
            ParamValue::Text(_) => ValueKind::Text,
            ParamValue::Range(_, _) => ValueKind::Range,
        }
    }

    /// Check if the value is an integer or a float
    pub fn is_numeric(&self) -> bool {
        matches!(self, ParamValue::Int(_) | ParamValue::Float(_))
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert `incoming` to the kind of `self`
    ///
    /// Values of the same kind pass through. An integer assigned over a float
    /// is widened, since saved trees and user input routinely drop the
    /// fractional part. Any other change of kind is a `TypeMismatch`. NaN
    /// (`NotANumber`) and ranges with `low > high` (`InvertedRange`) are
    /// refused whatever the current value. The parameter name in every error
    /// is left empty for the caller to fill in.
    pub fn conform(&self, incoming: ParamValue) -> Result<ParamValue> {
        let value = match (self, incoming) {
            (ParamValue::Float(_), ParamValue::Int(v)) => ParamValue::Float(v as f64),
            (current, incoming) if current.kind() == incoming.kind() => incoming,
            (current, incoming) => {
                return Err(ParamTreeError::TypeMismatch {
                    name: String::new(),
                    expected: current.kind().to_string(),
                    found: incoming.kind().to_string(),
                })
            }
        };

        value.ensure_well_formed()?;
        Ok(value)
    }

    /// Check that the value can be stored and saved as is
    ///
    /// NaN has no JSON form and never compares equal to itself, so it would
    /// break both snapshots and change detection.
    pub fn ensure_well_formed(&self) -> Result<()> {
        let not_a_number = || ParamTreeError::NotANumber {
            name: String::new(),
        };

        match self {
            ParamValue::Float(v) if v.is_nan() => Err(not_a_number()),
            ParamValue::Range(lo, hi) if lo.is_nan() || hi.is_nan() => Err(not_a_number()),
            ParamValue::Range(lo, hi) if lo > hi => Err(ParamTreeError::InvertedRange {
                name: String::new(),
                low: *lo,
                high: *hi,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{:?}", v),
            ParamValue::Range(lo, hi) => write!(f, "({}, {})", lo, hi),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<(f64, f64)> for ParamValue {
    fn from((lo, hi): (f64, f64)) -> Self {
        ParamValue::Range(lo, hi)
    }
}

fn mismatch(expected: ValueKind, found: &ParamValue) -> ParamTreeError {
    ParamTreeError::TypeMismatch {
        name: String::new(),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

impl TryFrom<&ParamValue> for bool {
    type Error = ParamTreeError;

    fn try_from(value: &ParamValue) -> Result<Self> {
        match value {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Bool, other)),
        }
    }
}

impl TryFrom<&ParamValue> for i64 {
    type Error = ParamTreeError;

    fn try_from(value: &ParamValue) -> Result<Self> {
        match value {
            ParamValue::Int(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Int, other)),
        }
    }
}

impl TryFrom<&ParamValue> for f64 {
    type Error = ParamTreeError;

    fn try_from(value: &ParamValue) -> Result<Self> {
        value.as_f64().ok_or_else(|| mismatch(ValueKind::Float, value))
    }
}

impl TryFrom<&ParamValue> for String {
    type Error = ParamTreeError;

    fn try_from(value: &ParamValue) -> Result<Self> {
        match value {
            ParamValue::Text(v) => Ok(v.clone()),
            other => Err(mismatch(ValueKind::Text, other)),
        }
    }
}

impl TryFrom<&ParamValue> for (f64, f64) {
    type Error = ParamTreeError;

    fn try_from(value: &ParamValue) -> Result<Self> {
        match value {
            ParamValue::Range(lo, hi) => Ok((*lo, *hi)),
            other => Err(mismatch(ValueKind::Range, other)),
        }
    }
}
