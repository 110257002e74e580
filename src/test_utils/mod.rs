//! Shared test utilities for rental tracker tests
//!
//! Fixtures, in-memory storage mocks and assertions used by unit tests and the
//! integration suites under `tests/`.

#[cfg(any(test, debug_assertions))]
pub mod mocks;

#[cfg(any(test, debug_assertions))]
pub mod fixtures;

#[cfg(any(test, debug_assertions))]
pub mod assertions;
