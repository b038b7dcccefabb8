//! Nested tree state
//!
//! [`TreeState`] is the serializable form of a whole [`ParameterTree`]: nested
//! maps whose inner keys are path segments and whose leaves are parameter
//! values. It serializes untagged, so its JSON is exactly the nested object a
//! user would expect, e.g. `{"a": {"gino": {"count": 1}}}`.
//!
//! [`ParameterTree`]: crate::parameters::ParameterTree

use crate::error::Result;
use crate::parameters::container::ValueMap;
use crate::parameters::value::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested mapping from path segments to values
pub type TreeState = BTreeMap<String, StateNode>;

/// A node of a [`TreeState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateNode {
    Branch(TreeState),
    Leaf(ParamValue),
}

impl StateNode {
    /// Turn the node into a branch, discarding a leaf if there is one
    fn make_branch(&mut self) -> &mut TreeState {
        if let StateNode::Leaf(value) = self {
            tracing::debug!(%value, "Replacing leaf value with a branch");
            *self = StateNode::Branch(TreeState::new());
        }

        match self {
            StateNode::Branch(branch) => branch,
            StateNode::Leaf(_) => unreachable!("leaf was replaced above"),
        }
    }
}

/// Get the branch addressed by `path`, creating every missing level
///
/// # Examples
///
/// ```
/// use paramtree::parameters::state::{branch_mut, StateNode, TreeState};
///
/// let mut state = TreeState::new();
/// branch_mut(&mut state, &["a", "gino"]);
///
/// let StateNode::Branch(a) = &state["a"] else { panic!() };
/// assert!(a.contains_key("gino"));
/// ```
pub fn branch_mut<'a>(state: &'a mut TreeState, path: &[&str]) -> &'a mut TreeState {
    let mut branch = state;
    for segment in path {
        branch = branch
            .entry(segment.to_string())
            .or_insert_with(|| StateNode::Branch(TreeState::new()))
            .make_branch();
    }
    branch
}

/// Write `values` as leaves of the branch addressed by `path`
///
/// Entries already in that branch are kept unless `values` has the same key.
pub fn merge_values(state: &mut TreeState, path: &[&str], values: ValueMap) {
    let branch = branch_mut(state, path);
    for (key, value) in values {
        branch.insert(key, StateNode::Leaf(value));
    }
}

/// Collect every leaf with the full list of segments leading to it
///
/// Empty branches contribute nothing.
pub fn leaves(state: &TreeState) -> Vec<(Vec<String>, &ParamValue)> {
    fn visit<'a>(
        branch: &'a TreeState,
        path: &mut Vec<String>,
        out: &mut Vec<(Vec<String>, &'a ParamValue)>,
    ) {
        for (key, node) in branch {
            path.push(key.clone());
            match node {
                StateNode::Leaf(value) => out.push((path.clone(), value)),
                StateNode::Branch(inner) => visit(inner, path, out),
            }
            path.pop();
        }
    }

    let mut out = Vec::new();
    visit(state, &mut Vec::new(), &mut out);
    out
}

/// Convert a state into a generic JSON value
pub fn to_json_value(state: &TreeState) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(state)?)
}

/// Read a state from a generic JSON value
///
/// The top level must be an object; `null` leaves and other values that are
/// not parameter values are rejected.
pub fn from_json_value(value: serde_json::Value) -> Result<TreeState> {
    Ok(serde_json::from_value(value)?)
}
