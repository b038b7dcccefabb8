//! Parameter-holding hosts
//!
//! A [`Parametrized`] object is a named bag of fields, each either a [`Param`]
//! or a plain value. Reads unwrap parameters to their values and writes go
//! through a single dispatch that keeps the change flag and the change signal
//! consistent, so callers can treat parameters as ordinary settings.

use crate::error::{ParamTreeError, Result};
use crate::parameters::container::{Field, ParamContainer, ValueMap};
use crate::parameters::param::Param;
use crate::parameters::signal::{ChangeSignal, ParamChange, SignalBlock};
use crate::parameters::tree::ParameterTree;
use crate::parameters::value::ParamValue;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a host, as held by a [`ParameterTree`] and by the code
/// that owns the host
pub type ParamHandle = Rc<RefCell<Parametrized>>;

/// A host object exposing some of its fields as parameters
///
/// # Examples
///
/// ```
/// use paramtree::parameters::{Param, ParamValue, Parametrized};
///
/// let mut camera = Parametrized::new("devices/camera")
///     .param("exposure", Param::new(0.01).with_unit("s"))
///     .param("binning", Param::new(1).with_choices([1, 2, 4]));
///
/// assert_eq!(camera.value::<f64>("exposure").unwrap(), 0.01);
///
/// camera.set("binning", 2).unwrap();
/// assert_eq!(camera.get("binning").unwrap(), &ParamValue::Int(2));
/// assert!(camera.set("binning", 3).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Parametrized {
    /// Tree path, `/`-separated
    name: String,

    params: ParamContainer,

    signal: Option<Rc<ChangeSignal>>,
}

impl Parametrized {
    /// Create a host with no fields
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: ParamContainer::new(),
            signal: None,
        }
    }

    /// Create a host with an initial set of parameters
    ///
    /// Parameters are installed in iteration order.
    pub fn with_params<I, S>(name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (S, Param)>,
        S: AsRef<str>,
    {
        let mut host = Self::new(name);
        for (key, param) in params {
            host.set_param(key.as_ref(), param);
        }
        host
    }

    /// Declare a parameter while building the host
    pub fn param(mut self, name: &str, param: Param) -> Self {
        self.set_param(name, param);
        self
    }

    /// Declare a plain, non-parameter field while building the host
    pub fn field(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, Field::Plain(value.into()));
        self
    }

    /// Attach a change signal while building the host
    pub fn with_signal(mut self) -> Self {
        self.enable_signal();
        self
    }

    /// Wrap the host in a shared handle without registering it anywhere
    pub fn into_shared(self) -> ParamHandle {
        Rc::new(RefCell::new(self))
    }

    /// Wrap the host in a shared handle and register it in `tree`
    ///
    /// Registration happens exactly once, after every field is in place.
    pub fn into_tree(self, tree: &mut ParameterTree) -> ParamHandle {
        let handle = self.into_shared();
        tree.add(Rc::clone(&handle));
        handle
    }

    /// Get the tree path of the host
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parameter container for introspection
    pub fn params(&self) -> &ParamContainer {
        &self.params
    }

    /// Get the parameter container for acknowledging changes
    pub fn params_mut(&mut self) -> &mut ParamContainer {
        &mut self.params
    }

    /// Read a field, unwrapping parameters to their value
    ///
    /// # Returns
    ///
    /// The value, or `KeyNotFound` if the host has no such field
    pub fn get(&self, name: &str) -> Result<&ParamValue> {
        self.params
            .field(name)
            .map(Field::value)
            .ok_or_else(|| ParamTreeError::KeyNotFound(name.to_string()))
    }

    /// Read a field as a concrete Rust type
    pub fn value<T>(&self, name: &str) -> Result<T>
    where
        T: for<'a> TryFrom<&'a ParamValue, Error = ParamTreeError>,
    {
        T::try_from(self.get(name)?).map_err(|e| e.named(name))
    }

    /// Write a value to a field
    ///
    /// - A new name becomes a plain field.
    /// - A parameter takes the value, after kind conversion and limit checks,
    ///   and is marked changed only if the value differs.
    /// - A plain field is overwritten.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a parameter value changed, `Ok(false)` otherwise, or
    /// the validation error with the parameter left untouched
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<bool> {
        let value = value.into();

        let changed = match self.params.field_mut(name) {
            Some(Field::Param(param)) => {
                if param.assign(value).map_err(|e| e.named(name))? {
                    Some(param.value().clone())
                } else {
                    None
                }
            }
            Some(field) => {
                *field = Field::Plain(value);
                None
            }
            None => {
                self.params.insert(name, Field::Plain(value));
                None
            }
        };

        match changed {
            Some(value) => {
                self.notify(name, value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Assign a whole parameter to a field
    ///
    /// Over an existing parameter, every attribute of `param` is copied into
    /// the existing slot; this is how a parameter's limits or metadata are
    /// redefined after construction. Anywhere else the parameter is stored
    /// as is.
    pub fn set_param(&mut self, name: &str, param: Param) {
        let changed = match self.params.field_mut(name) {
            Some(Field::Param(existing)) => {
                let differs = existing.value() != param.value();
                existing.merge_from(param);
                tracing::debug!(host = %self.name, param = name, "Parameter redefined");
                differs.then(|| existing.value().clone())
            }
            Some(field) => {
                *field = Field::Param(param);
                None
            }
            None => {
                self.params.insert(name, Field::Param(param));
                None
            }
        };

        if let Some(value) = changed {
            self.notify(name, value);
        }
    }

    /// Write several parameter values at once
    ///
    /// The batch is all-or-nothing: every key must name a parameter and every
    /// value must be accepted by it, otherwise the first failure is returned
    /// and no value is written. Accepted values go through [`Parametrized::set`].
    pub fn set_values(&mut self, values: ValueMap) -> Result<()> {
        for (key, value) in &values {
            self.params
                .get(key)?
                .validate(value.clone())
                .map_err(|e| e.named(key))?;
        }

        for (key, value) in values {
            self.set(&key, value)?;
        }

        Ok(())
    }

    /// Clear the change flag of every parameter
    pub fn acknowledge_changes(&mut self) {
        self.params.acknowledge_changes();
    }

    /// Attach a change signal if the host does not have one yet
    pub fn enable_signal(&mut self) -> Rc<ChangeSignal> {
        Rc::clone(
            self.signal
                .get_or_insert_with(|| Rc::new(ChangeSignal::new())),
        )
    }

    /// Get the change signal, if the host has one
    pub fn signal(&self) -> Option<&Rc<ChangeSignal>> {
        self.signal.as_ref()
    }

    /// Register an observer for value changes, attaching a signal if needed
    ///
    /// Observers run inside the write that triggered them. When the host sits
    /// behind a [`ParamHandle`], that write holds the host's `RefCell`
    /// mutably, so an observer must not borrow its own host: doing so panics.
    /// To keep a derived parameter in sync, recompute it after `set` returns
    /// while holding a [`SignalBlock`], so the derived write does not notify
    /// again.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::{Param, Parametrized};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let mut stage = Parametrized::new("stage")
    ///     .param("speed", Param::new(2.0))
    ///     .param("period", Param::new(0.5));
    ///
    /// let hits = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&hits);
    /// stage.on_change(move |_| counter.set(counter.get() + 1));
    ///
    /// stage.set("speed", 4.0).unwrap();
    /// {
    ///     let _block = stage.block_signal();
    ///     let period = 1.0 / stage.value::<f64>("speed").unwrap();
    ///     stage.set("period", period).unwrap();
    /// }
    ///
    /// assert_eq!(stage.value::<f64>("period").unwrap(), 0.25);
    /// assert_eq!(hits.get(), 1);
    /// ```
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: Fn(&ParamChange) + 'static,
    {
        self.enable_signal().connect(observer);
    }

    /// Suppress change notifications until the guard is dropped
    ///
    /// # Returns
    ///
    /// The guard, or `None` if the host has no signal
    pub fn block_signal(&self) -> Option<SignalBlock> {
        self.signal.as_ref().map(ChangeSignal::block)
    }

    fn notify(&self, name: &str, value: ParamValue) {
        if let Some(signal) = &self.signal {
            signal.emit(&ParamChange {
                name: name.to_string(),
                value,
            });
        }
    }
}
