//! Common Test Utilities
//!
//! Shared fixtures for backend replies, character snapshots, key events
//! and service handles.

pub mod fixtures;

pub use fixtures::*;
