//! Per-host field storage
//!
//! This module provides the [`ParamContainer`], which stores every named field
//! of a [`Parametrized`](crate::parameters::Parametrized) host in declaration
//! order and offers the parameter-level introspection used by display layers
//! and by the tree: enumeration, bulk value reads, and change tracking.

use crate::error::{ParamTreeError, Result};
use crate::parameters::param::Param;
use crate::parameters::value::ParamValue;
use std::collections::{BTreeMap, HashMap};

/// Parameter name to value mapping, as exchanged in bulk reads and writes
pub type ValueMap = BTreeMap<String, ParamValue>;

/// A named field of a host: either a parameter or a plain value
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Param(Param),
    Plain(ParamValue),
}

impl Field {
    /// The value seen by readers of the host, unwrapped from any parameter
    pub fn value(&self) -> &ParamValue {
        match self {
            Field::Param(param) => param.value(),
            Field::Plain(value) => value,
        }
    }

    pub fn as_param(&self) -> Option<&Param> {
        match self {
            Field::Param(param) => Some(param),
            Field::Plain(_) => None,
        }
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Field::Param(_))
    }
}

/// Ordered field storage with parameter introspection
///
/// Every view is computed from the live fields, so parameters added to the
/// host after construction show up immediately.
#[derive(Debug, Clone, Default)]
pub struct ParamContainer {
    /// Field names in insertion order
    order: Vec<String>,

    fields: HashMap<String, Field>,
}

impl ParamContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name
    ///
    /// # Returns
    ///
    /// The parameter, or `KeyNotFound` if the name is missing or holds a
    /// plain field
    pub fn get(&self, name: &str) -> Result<&Param> {
        self.fields
            .get(name)
            .and_then(Field::as_param)
            .ok_or_else(|| ParamTreeError::KeyNotFound(name.to_string()))
    }

    /// Get any field, parameter or plain, by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Check if `name` is a parameter of the host
    pub fn contains(&self, name: &str) -> bool {
        self.fields.get(name).map_or(false, Field::is_param)
    }

    /// Iterate over the parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.order.iter().filter_map(move |name| {
            self.fields
                .get(name)
                .and_then(Field::as_param)
                .map(|param| (name.as_str(), param))
        })
    }

    /// Iterate over every field, plain ones included, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.order
            .iter()
            .filter_map(move |name| self.fields.get(name).map(|field| (name.as_str(), field)))
    }

    /// Get the parameters as (name, parameter) pairs in declaration order
    pub fn items(&self) -> Vec<(&str, &Param)> {
        self.iter().collect()
    }

    /// Get the parameter names in declaration order
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|(name, _)| name.to_string()).collect()
    }

    /// Get the current value of every parameter
    pub fn values(&self) -> ValueMap {
        self.iter()
            .map(|(name, param)| (name.to_string(), param.value().clone()))
            .collect()
    }

    /// Get the values of the parameters changed since the last acknowledgment
    pub fn changed_values(&self) -> ValueMap {
        self.iter()
            .filter(|(_, param)| param.changed())
            .map(|(name, param)| (name.to_string(), param.value().clone()))
            .collect()
    }

    /// Clear the change flag of every parameter
    pub fn acknowledge_changes(&mut self) {
        for field in self.fields.values_mut() {
            if let Field::Param(param) = field {
                param.acknowledge();
            }
        }
    }

    /// Get the number of parameters (plain fields are not counted)
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a field, keeping its original position if the name exists
    pub(crate) fn insert(&mut self, name: &str, field: Field) {
        if self.fields.insert(name.to_string(), field).is_none() {
            self.order.push(name.to_string());
        }
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }
}
