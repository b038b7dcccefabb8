//! # Parameter System
//!
//! This module provides typed, bounded, user-editable settings ("parameters")
//! declared on host objects, and a tree that saves and restores the state of
//! many hosts at once.
//!
//! ## Key Features
//!
//! - **Typed Values**: A closed set of value shapes (integers, floats, booleans, text, ranges)
//! - **Limits**: Optional numeric bounds or explicit lists of allowed choices
//! - **Change Tracking**: Every parameter carries a dirty flag, cleared by explicit acknowledgment
//! - **Display Hints**: The preferred control for each parameter is inferred from its shape
//! - **Change Notification**: Observers are called on value changes, with scoped suppression
//! - **Tree Snapshots**: Whole-tree serialize/restore to nested maps, tolerant of stale entries
//!
//! ## Core Components
//!
//! - [`Param`]: A single parameter with value, limits and metadata
//! - [`Parametrized`]: A host whose fields are parameters or plain values
//! - [`ParamContainer`]: Introspection over a host's parameters
//! - [`ParameterTree`]: A registry of hosts addressed by `/`-separated paths
//! - [`TreeState`]: The nested, serde-serializable form of a tree
//!
//! ## Example Usage
//!
//! ```rust
//! use paramtree::parameters::{Param, ParameterTree, Parametrized};
//!
//! let mut tree = ParameterTree::new();
//!
//! let stage = Parametrized::new("rig/stage")
//!     .param("speed", Param::new(2.5).with_bounds(0.0, 10.0).unwrap().with_unit("mm/s"))
//!     .param("homed", Param::new(false).with_loadable(false))
//!     .into_tree(&mut tree);
//!
//! let saved = tree.serialize();
//!
//! stage.borrow_mut().set("speed", 7.0).unwrap();
//! tree.deserialize(&saved);
//!
//! assert_eq!(stage.borrow().value::<f64>("speed").unwrap(), 2.5);
//! ```

pub mod container;
pub mod limits;
pub mod param;
pub mod parametrized;
pub mod signal;
pub mod state;
pub mod tree;
pub mod value;


// Re-export key types
pub use container::{Field, ParamContainer, ValueMap};
pub use limits::Limits;
pub use param::{GuiHint, Param, Scale};
pub use parametrized::{ParamHandle, Parametrized};
pub use signal::{ChangeSignal, ParamChange, SignalBlock};
pub use state::{StateNode, TreeState};
pub use tree::{ParameterTree, RestoreReport, SkipReason, SkippedRestore};
pub use value::{ParamValue, ValueKind};
