//! Crate-internal test suites.
//!
//! - `common`: shared fixtures
//! - `unit`: controller and app-loop flows against a mocked backend
//! - `property`: proptest invariants

pub mod common;
mod unit;
