//! Shared leaf utilities for the weft styling engine.
//!
//! This crate provides the content hash used to derive class and animation
//! identifiers, a single-argument pure-function memoizer, and the static set
//! of CSS properties that never receive an implicit unit suffix.

#![warn(missing_docs)]

pub mod hash;
pub mod memo;
pub mod unitless;

pub use hash::StyleHash;
pub use memo::Memo;
pub use unitless::is_unitless;
