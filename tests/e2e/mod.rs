//! End-to-end test harness for the `rental` binary
//!
//! Runs the built binary against an isolated temporary home, data directory
//! and configuration file.

pub mod assertions;
pub mod common;

pub use assertions::*;
pub use common::*;
