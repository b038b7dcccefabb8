use thiserror::Error;

/// Error types for the paramtree library.
#[derive(Error, Debug)]
pub enum ParamTreeError {
    /// A named parameter or field does not exist on the host.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A value of the wrong kind was assigned to or read from a parameter.
    #[error("Type mismatch for '{name}': expected {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// No display control exists for the parameter's hint.
    #[error("Unsupported gui hint {hint} for parameter '{name}'")]
    UnsupportedGuiHint { name: String, hint: String },

    /// A numeric value fell outside the parameter's bounds.
    #[error("Value {value} for '{name}' is outside bounds [{min}, {max}]")]
    OutOfBounds {
        name: String,
        value: String,
        min: f64,
        max: f64,
    },

    /// A value is not among the parameter's allowed choices.
    #[error("Value {value} is not an allowed choice for '{name}'")]
    InvalidChoice { name: String, value: String },

    /// A float or range end that is NaN.
    #[error("NaN is not a valid value for '{name}'")]
    NotANumber { name: String },

    /// A range whose low end lies above its high end.
    #[error("Range ({low}, {high}) for '{name}' is inverted")]
    InvertedRange { name: String, low: f64, high: f64 },

    /// Limits that can never be satisfied.
    #[error("Invalid limits: min ({min}) must not exceed max ({max})")]
    InvalidLimits { min: f64, max: f64 },

    /// The other end of a snapshot channel has gone away.
    #[error("Snapshot channel disconnected")]
    Disconnected,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParamTreeError {
    /// Attach a parameter name to an error raised before the name was known.
    pub(crate) fn named(self, name: &str) -> Self {
        match self {
            ParamTreeError::TypeMismatch {
                expected, found, ..
            } => ParamTreeError::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            },
            ParamTreeError::OutOfBounds { value, min, max, .. } => ParamTreeError::OutOfBounds {
                name: name.to_string(),
                value,
                min,
                max,
            },
            ParamTreeError::InvalidChoice { value, .. } => ParamTreeError::InvalidChoice {
                name: name.to_string(),
                value,
            },
            ParamTreeError::NotANumber { .. } => ParamTreeError::NotANumber {
                name: name.to_string(),
            },
            ParamTreeError::InvertedRange { low, high, .. } => ParamTreeError::InvertedRange {
                name: name.to_string(),
                low,
                high,
            },
            other => other,
        }
    }
}

/// Result type alias for paramtree operations.
pub type Result<T> = std::result::Result<T, ParamTreeError>;
