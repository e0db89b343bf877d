//! High-level operations.
//!
//! This module contains the implementation of Inliner commands.

pub mod flatten;

pub use flatten::{flatten, FlattenOptions, FlattenResult};
