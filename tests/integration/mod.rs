//! Integration tests for the outer layers of the library
//!
//! These tests drive hosts the way a display layer or a worker thread would.

// Control descriptor tests
mod control_tests;
