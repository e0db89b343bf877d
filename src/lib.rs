//! Inliner - a single-file flattener for C++ competitive-programming libraries
//!
//! This crate provides the core library functionality for Inliner,
//! including local include recognition, depth-first include expansion,
//! and heuristic comment stripping.

pub mod comment;
pub mod directive;
pub mod expand;
pub mod ops;
pub mod util;

pub use comment::CommentStripper;
pub use directive::{GuardMarker, IncludePattern, IncludeRef};
pub use expand::{ExpandError, ExpandOptions, Expander, Expansion};
pub use ops::flatten::{flatten, FlattenOptions, FlattenResult};
