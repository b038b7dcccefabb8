//! Display control descriptors
//!
//! Widget toolkits do not need to know about [`Param`] internals: they take a
//! [`ControlSpec`] per parameter, which pairs the control to build with
//! everything it must show, and push edits back through
//! [`Parametrized::set`]. Building a descriptor fails fast when a parameter's hint
//! cannot be honoured for its value.

use crate::error::{ParamTreeError, Result};
use crate::parameters::{GuiHint, Limits, Param, ParamValue, Parametrized, Scale};

/// The control to build, with its configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Numeric entry box, optionally bounded
    Spin {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    /// Numeric slider; always bounded
    Slider { min: f64, max: f64, integer: bool },
    Check,
    Combo { choices: Vec<ParamValue> },
    Text,
    /// Two-handle slider over an optionally bounded span
    Range { min: Option<f64>, max: Option<f64> },
}

/// Everything a display layer needs to render one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub name: String,
    pub kind: ControlKind,
    pub value: ParamValue,
    pub description: String,
    pub unit: String,
    pub scale: Option<Scale>,
    pub editable: bool,
}

fn bounds_of(param: &Param) -> (Option<f64>, Option<f64>) {
    match param.limits() {
        Some(Limits::Bounds { min, max }) => (Some(*min), Some(*max)),
        _ => (None, None),
    }
}

fn mismatch(name: &str, hint: GuiHint, found: String) -> ParamTreeError {
    ParamTreeError::TypeMismatch {
        name: name.to_string(),
        expected: format!("a value suited to a {} control", hint),
        found,
    }
}

impl ControlSpec {
    /// Build the control descriptor for a parameter
    ///
    /// # Returns
    ///
    /// The descriptor, `UnsupportedGuiHint` if the parameter is hidden, or
    /// `TypeMismatch` if the hint does not fit the value or limits
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::control::{ControlKind, ControlSpec};
    /// use paramtree::parameters::Param;
    ///
    /// let spec = ControlSpec::from_param("on", &Param::new(true)).unwrap();
    /// assert_eq!(spec.kind, ControlKind::Check);
    ///
    /// assert!(ControlSpec::from_param("off", &Param::new(1).without_gui()).is_err());
    /// ```
    pub fn from_param(name: &str, param: &Param) -> Result<Self> {
        let hint = param.gui().ok_or_else(|| ParamTreeError::UnsupportedGuiHint {
            name: name.to_string(),
            hint: "none".to_string(),
        })?;

        let value = param.value();
        let integer = matches!(value, ParamValue::Int(_));
        let (min, max) = bounds_of(param);

        let kind = match hint {
            GuiHint::Spin if value.is_numeric() => ControlKind::Spin { min, max, integer },
            GuiHint::Slider if value.is_numeric() => match (min, max) {
                (Some(min), Some(max)) => ControlKind::Slider { min, max, integer },
                _ => return Err(mismatch(name, hint, "an unbounded number".to_string())),
            },
            GuiHint::Check if matches!(value, ParamValue::Bool(_)) => ControlKind::Check,
            GuiHint::Combo => match param.limits() {
                Some(Limits::Choices(choices)) => ControlKind::Combo {
                    choices: choices.clone(),
                },
                _ => return Err(mismatch(name, hint, "no list of choices".to_string())),
            },
            GuiHint::Text if matches!(value, ParamValue::Text(_)) => ControlKind::Text,
            GuiHint::Range if matches!(value, ParamValue::Range(_, _)) => {
                ControlKind::Range { min, max }
            }
            _ => return Err(mismatch(name, hint, value.kind().to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            kind,
            value: value.clone(),
            description: param.description().to_string(),
            unit: param.unit().to_string(),
            scale: param.scale(),
            editable: param.editable(),
        })
    }
}

impl Parametrized {
    /// Build control descriptors for every displayed parameter
    ///
    /// Hidden parameters are left out; any other parameter whose hint cannot
    /// be honoured fails the whole call.
    pub fn control_specs(&self) -> Result<Vec<ControlSpec>> {
        self.params()
            .iter()
            .filter(|(_, param)| param.gui().is_some())
            .map(|(name, param)| ControlSpec::from_param(name, param))
            .collect()
    }
}
