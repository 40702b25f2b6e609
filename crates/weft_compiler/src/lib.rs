//! Nesting-aware CSS rule compiler for the weft styling engine.
//!
//! Given a scope selector and flat rule text (declarations plus nested
//! blocks), the compiler expands `&`-references, descendant selectors, and
//! at-rule blocks into standalone CSS rules. During compilation it invokes a
//! plugin callback once per structural fragment with a [`Phase`] code; the
//! rule pipeline in `weft_core` uses those events to decide which fragments
//! reach the stylesheet sink.

#![warn(missing_docs)]

pub mod compiler;
pub mod error;
pub mod phase;

pub use compiler::{CompilerOptions, RuleCompiler, StyleCompiler};
pub use error::CompileError;
pub use phase::{Phase, PluginEvent};
