//! Test utilities
//!
//! Manual mock implementations of the ports and fixtures for unit testing.
//! Mocks record what the controller did so tests can assert on it.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
