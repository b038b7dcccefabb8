//! Parameter limits
//!
//! A parameter may be restricted either by an inclusive numeric interval or by
//! an explicit list of allowed values. Which one applies is decided by the
//! shape of the limits, and bounds are only meaningful for numeric values and
//! ranges.

use crate::error::{ParamTreeError, Result};
use crate::parameters::value::ParamValue;
use serde::{Deserialize, Serialize};

/// Constraints on the values a parameter accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Limits {
    /// Inclusive `[min, max]` interval for numbers and both ends of a range
    Bounds { min: f64, max: f64 },

    /// Explicit set of allowed values, shown as a combo box
    Choices(Vec<ParamValue>),
}

impl Limits {
    /// Create interval limits
    ///
    /// # Returns
    ///
    /// The limits if `min <= max`, or `InvalidLimits` otherwise (including
    /// when either end is NaN)
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::Limits;
    ///
    /// assert!(Limits::bounds(0.0, 10.0).is_ok());
    /// assert!(Limits::bounds(10.0, 0.0).is_err());
    /// ```
    pub fn bounds(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ParamTreeError::InvalidLimits { min, max });
        }

        Ok(Limits::Bounds { min, max })
    }

    /// Create a list of allowed values
    pub fn choices<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Limits::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Check if these limits are a list of choices
    pub fn is_choices(&self) -> bool {
        matches!(self, Limits::Choices(_))
    }

    /// Verify that `value` satisfies the limits
    ///
    /// Bounds ignore non-numeric values. NaN and inverted ranges are refused
    /// before the limits are consulted. The parameter name in the returned
    /// error is left empty for the caller to fill in.
    pub fn check(&self, value: &ParamValue) -> Result<()> {
        value.ensure_well_formed()?;

        match self {
            Limits::Bounds { min, max } => {
                let within = |v: f64| v >= *min && v <= *max;
                let ok = match value {
                    ParamValue::Int(_) | ParamValue::Float(_) => {
                        value.as_f64().map(within).unwrap_or(true)
                    }
                    ParamValue::Range(lo, hi) => within(*lo) && within(*hi),
                    _ => true,
                };

                if ok {
                    Ok(())
                } else {
                    Err(ParamTreeError::OutOfBounds {
                        name: String::new(),
                        value: value.to_string(),
                        min: *min,
                        max: *max,
                    })
                }
            }
            Limits::Choices(choices) => {
                if choices.iter().any(|c| c == value) {
                    Ok(())
                } else {
                    Err(ParamTreeError::InvalidChoice {
                        name: String::new(),
                        value: value.to_string(),
                    })
                }
            }
        }
    }

    /// Clamp a numeric value or range into the bounds
    ///
    /// Values that bounds do not apply to, and all values under `Choices`,
    /// are returned unchanged.
    pub fn clamp(&self, value: ParamValue) -> ParamValue {
        let (min, max) = match self {
            Limits::Bounds { min, max } => (*min, *max),
            Limits::Choices(_) => return value,
        };

        match value {
            ParamValue::Float(v) => ParamValue::Float(v.clamp(min, max)),
            ParamValue::Int(v) => {
                if (v as f64) < min {
                    ParamValue::Int(min.ceil() as i64)
                } else if (v as f64) > max {
                    ParamValue::Int(max.floor() as i64)
                } else {
                    ParamValue::Int(v)
                }
            }
            ParamValue::Range(lo, hi) => ParamValue::Range(lo.clamp(min, max), hi.clamp(min, max)),
            other => other,
        }
    }
}
