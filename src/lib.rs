//! # paramtree
//!
//! `paramtree` is a reactive parameter-management layer: application code
//! declares typed, bounded, user-editable settings on host objects, organises
//! the hosts into a named tree, and saves or restores the whole tree as nested
//! key-value data.
//!
//! The library provides:
//! - Parameters with limits, display hints, units and a change flag
//! - Hosts that read and write parameters like plain settings
//! - A path-addressed tree with tolerant, partial-failure-safe restore
//! - Change notification with scoped suppression
//! - Control descriptors for widget toolkits
//! - A snapshot channel for driving a host from another thread
//!
//! ## Basic Usage
//!
//! ```
//! use paramtree::parameters::{Param, ParameterTree, Parametrized};
//!
//! let mut tree = ParameterTree::new();
//! let gino = Parametrized::new("a/gino")
//!     .param("count", Param::new(1))
//!     .param("ratio", Param::new(1.0))
//!     .into_tree(&mut tree);
//!
//! let json = serde_json::to_string(&tree.serialize()).unwrap();
//! assert_eq!(json, r#"{"a":{"gino":{"count":1,"ratio":1.0}}}"#);
//!
//! gino.borrow_mut().set("count", 3).unwrap();
//! assert_eq!(gino.borrow().value::<i64>("count").unwrap(), 3);
//! ```

// Public modules
pub mod error;

// Parameter system
pub mod parameters;

// Display layer bridge
pub mod control;

// Conditional modules
#[cfg(feature = "link")]
pub mod link;

// Re-exports for convenience
pub use error::{ParamTreeError, Result};
pub use parameters::{Param, ParamValue, ParameterTree, Parametrized};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
