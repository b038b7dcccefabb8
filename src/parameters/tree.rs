//! Parameter tree
//!
//! This module provides the [`ParameterTree`], a flat registry of hosts keyed
//! by their `/`-separated names. The hierarchy only materializes when the tree
//! is converted to or from a nested [`TreeState`], which makes restoring
//! independent of registration order and tolerant of stale save files.

use crate::parameters::parametrized::ParamHandle;
use crate::parameters::state::{self, TreeState};
use crate::parameters::value::ParamValue;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Name that is never restored, whatever the save file says
const RESERVED_KEY: &str = "loadable";

/// Why a leaf of a restore was not applied
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No host is registered under the leaf's object path
    UnknownObject,

    /// The leaf is named `loadable`
    ReservedKey,

    /// The host has no parameter with that name
    UnknownParameter,

    /// The parameter is excluded from restores
    NotLoadable,

    /// The parameter refused the value, or its host was busy
    Rejected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownObject => write!(f, "not present in the parameter tree"),
            SkipReason::ReservedKey => write!(f, "reserved key"),
            SkipReason::UnknownParameter => write!(f, "no such parameter"),
            SkipReason::NotLoadable => write!(f, "parameter is not loadable"),
            SkipReason::Rejected(msg) => write!(f, "rejected: {}", msg),
        }
    }
}

/// A leaf of a restore that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRestore {
    /// Full `/`-joined path of the leaf
    pub path: String,
    pub reason: SkipReason,
}

/// Outcome of [`ParameterTree::deserialize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    /// Number of leaves written to a parameter, including no-op writes
    pub restored: usize,
    pub skipped: Vec<SkippedRestore>,
}

impl RestoreReport {
    /// Check if every leaf was applied
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Registry of hosts addressed by path
///
/// # Examples
///
/// ```
/// use paramtree::parameters::{Param, ParameterTree, Parametrized};
///
/// let mut tree = ParameterTree::new();
/// let gino = Parametrized::new("a/gino")
///     .param("count", Param::new(1))
///     .into_tree(&mut tree);
///
/// let snapshot = tree.serialize();
/// gino.borrow_mut().set("count", 10).unwrap();
/// assert_ne!(tree.serialize(), snapshot);
///
/// let report = tree.deserialize(&snapshot);
/// assert!(report.is_complete());
/// assert_eq!(tree.serialize(), snapshot);
/// ```
#[derive(Debug, Default)]
pub struct ParameterTree {
    tracked: BTreeMap<String, ParamHandle>,
}

impl ParameterTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host under its name
    ///
    /// A host registered under a name already in use replaces the earlier one.
    pub fn add(&mut self, host: ParamHandle) {
        let path = host.borrow().name().to_string();
        if self.tracked.insert(path.clone(), host).is_some() {
            tracing::debug!(%path, "Replacing host already registered in the tree");
        } else {
            tracing::debug!(%path, "Host registered in the tree");
        }
    }

    /// Get the host registered under `path`
    pub fn get(&self, path: &str) -> Option<ParamHandle> {
        self.tracked.get(path).map(Rc::clone)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tracked.contains_key(path)
    }

    /// Get the registered paths in sorted order
    pub fn paths(&self) -> Vec<&str> {
        self.tracked.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Capture every parameter value of every host as a nested state
    ///
    /// Each host's values land at the location spelled by its path, so hosts
    /// sharing a prefix become siblings. Loadability is not consulted.
    ///
    /// A host that is mutably borrowed at the time, typically because the
    /// call comes from one of its own change observers, is left out of the
    /// state with a warning, the same way [`ParameterTree::deserialize`]
    /// skips it.
    pub fn serialize(&self) -> TreeState {
        let mut out = TreeState::new();
        for (path, host) in &self.tracked {
            let Ok(host) = host.try_borrow() else {
                tracing::warn!(%path, "Skipping serialize of host borrowed elsewhere");
                continue;
            };

            let segments: Vec<&str> = path.split('/').collect();
            state::merge_values(&mut out, &segments, host.params().values());
        }
        out
    }

    /// Restore parameter values from a nested state
    ///
    /// Every leaf is handled on its own: the segments before the last one
    /// name the host, the last one names the parameter. Leaves that cannot be
    /// applied are logged and reported, never raised, so one stale entry does
    /// not stop the rest of the restore. Change notifications of each host
    /// are suppressed while its value is written; the change flag is still
    /// updated.
    pub fn deserialize(&self, state: &TreeState) -> RestoreReport {
        let mut report = RestoreReport::default();

        for (segments, value) in state::leaves(state) {
            let Some((param, host_path)) = segments.split_last() else {
                continue;
            };

            match self.restore_leaf(&host_path.join("/"), param, value) {
                Ok(()) => report.restored += 1,
                Err(reason) => {
                    let path = segments.join("/");
                    tracing::warn!(%path, %reason, "Skipping restore of parameter");
                    report.skipped.push(SkippedRestore { path, reason });
                }
            }
        }

        tracing::debug!(
            restored = report.restored,
            skipped = report.skipped.len(),
            "Parameter tree restored"
        );
        report
    }

    fn restore_leaf(
        &self,
        host_path: &str,
        param: &str,
        value: &ParamValue,
    ) -> Result<(), SkipReason> {
        let host = self.tracked.get(host_path).ok_or(SkipReason::UnknownObject)?;

        if param == RESERVED_KEY {
            return Err(SkipReason::ReservedKey);
        }

        let mut host = host
            .try_borrow_mut()
            .map_err(|_| SkipReason::Rejected("host is borrowed elsewhere".to_string()))?;

        let loadable = host
            .params()
            .get(param)
            .map_err(|_| SkipReason::UnknownParameter)?
            .loadable();
        if !loadable {
            return Err(SkipReason::NotLoadable);
        }

        let _block = host.block_signal();
        host.set(param, value.clone())
            .map_err(|e| SkipReason::Rejected(e.to_string()))?;
        Ok(())
    }
}
