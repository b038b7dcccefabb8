//! Parameter definition and implementation
//!
//! This module provides the [`Param`] struct, the fundamental building block of
//! the parameter system: a typed value with optional limits, descriptive
//! metadata for display layers, and a change flag. Parameters are declared on
//! a [`Parametrized`](crate::parameters::Parametrized) host, which owns every
//! mutation so the change flag stays truthful.

use crate::error::{ParamTreeError, Result};
use crate::parameters::limits::Limits;
use crate::parameters::value::{ParamValue, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred display control for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuiHint {
    Spin,
    Slider,
    Check,
    Combo,
    Text,
    Range,
}

impl GuiHint {
    /// Infer a display hint from the shape of a value and its limits
    ///
    /// Precedence: a list of choices wins over the value kind, then booleans,
    /// numbers, text and ranges map to their natural control.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::{GuiHint, Limits, ParamValue};
    ///
    /// assert_eq!(GuiHint::infer(&ParamValue::Int(5), None), Some(GuiHint::Spin));
    ///
    /// let choices = Limits::choices(["x", "y"]);
    /// assert_eq!(
    ///     GuiHint::infer(&ParamValue::from("x"), Some(&choices)),
    ///     Some(GuiHint::Combo)
    /// );
    /// ```
    pub fn infer(value: &ParamValue, limits: Option<&Limits>) -> Option<GuiHint> {
        if limits.map_or(false, Limits::is_choices) {
            return Some(GuiHint::Combo);
        }

        match value.kind() {
            ValueKind::Bool => Some(GuiHint::Check),
            ValueKind::Int | ValueKind::Float => Some(GuiHint::Spin),
            ValueKind::Text => Some(GuiHint::Text),
            ValueKind::Range => Some(GuiHint::Range),
        }
    }

    /// Name of the hint as used in saved metadata and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            GuiHint::Spin => "spin",
            GuiHint::Slider => "slider",
            GuiHint::Check => "check",
            GuiHint::Combo => "combo",
            GuiHint::Text => "text",
            GuiHint::Range => "range",
        }
    }
}

impl fmt::Display for GuiHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale hint for real-valued parameters; informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Linear,
    Log,
}

/// A user-editable setting
///
/// A parameter is created once, typically while its host is being built, and
/// then only changes through the host's `set` path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Current value of the parameter
    value: ParamValue,

    /// Optional bounds or allowed choices
    limits: Option<Limits>,

    /// Free-text description, shown as a tooltip by display layers
    description: String,

    /// Preferred display control, `None` when the parameter is hidden
    gui: Option<GuiHint>,

    /// Whether `gui` was chosen by the caller rather than inferred
    #[serde(skip)]
    gui_explicit: bool,

    /// Physical unit, if any
    unit: String,

    scale: Option<Scale>,

    /// Dirty bit: set on construction and on every value change
    changed: bool,

    editable: bool,

    /// Whether a tree restore may overwrite this parameter
    loadable: bool,
}

impl Param {
    /// Create a new parameter with the given value
    ///
    /// The parameter starts out changed, editable and loadable, without
    /// limits, and with a display hint inferred from the value. The value is
    /// taken as given; NaN and inverted ranges are only refused on writes.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::{GuiHint, Param, ParamValue};
    ///
    /// let param = Param::new(5);
    /// assert_eq!(param.value(), &ParamValue::Int(5));
    /// assert_eq!(param.gui(), Some(GuiHint::Spin));
    /// assert!(param.changed());
    /// assert!(param.loadable());
    /// ```
    pub fn new(value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        let gui = GuiHint::infer(&value, None);

        Self {
            value,
            limits: None,
            description: String::new(),
            gui,
            gui_explicit: false,
            unit: String::new(),
            scale: None,
            changed: true,
            editable: true,
            loadable: true,
        }
    }

    /// Restrict the parameter to an inclusive numeric interval
    ///
    /// The current value is clamped into the interval.
    ///
    /// # Returns
    ///
    /// The bounded parameter, or `InvalidLimits` if `min > max` or no value
    /// of the parameter's kind lies within the interval
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::{Param, ParamValue};
    ///
    /// let param = Param::new(12.0).with_bounds(0.0, 10.0).unwrap();
    /// assert_eq!(param.value(), &ParamValue::Float(10.0));
    /// ```
    pub fn with_bounds(self, min: f64, max: f64) -> Result<Self> {
        self.with_limits(Limits::bounds(min, max)?)
    }

    /// Restrict the parameter to a list of allowed values
    pub fn with_choices<I, V>(self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.install_limits(Limits::choices(choices))
    }

    /// Replace the parameter's limits
    ///
    /// Bounds clamp the current value into the interval. The initial value
    /// is not required to be one of the choices.
    ///
    /// # Returns
    ///
    /// The limited parameter, or `InvalidLimits` if the bounds hold no value
    /// of the parameter's kind, e.g. an integer bounded by `[0.5, 0.7]`
    pub fn with_limits(mut self, limits: Limits) -> Result<Self> {
        if let Limits::Bounds { min, max } = limits {
            let clamped = limits.clamp(self.value.clone());
            if limits.check(&clamped).is_err() {
                return Err(ParamTreeError::InvalidLimits { min, max });
            }
            self.value = clamped;
        }

        Ok(self.install_limits(limits))
    }

    fn install_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self.refresh_gui();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Choose the display control instead of inferring it
    pub fn with_gui(mut self, gui: GuiHint) -> Self {
        self.gui = Some(gui);
        self.gui_explicit = true;
        self
    }

    /// Hide the parameter from display layers
    pub fn without_gui(mut self) -> Self {
        self.gui = None;
        self.gui_explicit = true;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Set whether a tree restore may overwrite this parameter
    pub fn with_loadable(mut self, loadable: bool) -> Self {
        self.loadable = loadable;
        self
    }

    fn refresh_gui(&mut self) {
        if !self.gui_explicit {
            self.gui = GuiHint::infer(&self.value, self.limits.as_ref());
        }
    }

    /// Get the current value of the parameter
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// Get the kind of value this parameter holds
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn limits(&self) -> Option<&Limits> {
        self.limits.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the display hint, or `None` if the parameter is hidden
    pub fn gui(&self) -> Option<GuiHint> {
        self.gui
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    /// Check if the value changed since the last acknowledgment
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn loadable(&self) -> bool {
        self.loadable
    }

    /// Conform `value` to this parameter's kind and check it against the limits
    ///
    /// Errors carry an empty parameter name; the container fills it in.
    pub(crate) fn validate(&self, value: ParamValue) -> Result<ParamValue> {
        let value = self.value.conform(value)?;
        if let Some(limits) = &self.limits {
            limits.check(&value)?;
        }
        Ok(value)
    }

    /// Store a new value, marking the parameter changed if it differs
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the stored value changed, `Ok(false)` for a no-op write
    pub(crate) fn assign(&mut self, value: ParamValue) -> Result<bool> {
        let value = self.validate(value)?;
        if value == self.value {
            return Ok(false);
        }

        self.value = value;
        self.changed = true;
        Ok(true)
    }

    /// Take over every field of `other`, keeping this parameter's slot
    pub(crate) fn merge_from(&mut self, other: Param) {
        *self = other;
    }

    pub(crate) fn acknowledge(&mut self) {
        self.changed = false;
    }
}
