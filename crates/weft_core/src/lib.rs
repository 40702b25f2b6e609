//! The weft styling engine: serialization, dedup caches, and rule pipeline.
//!
//! Style inputs (nested blocks, templates with embedded dynamic values, or
//! raw CSS text) are serialized to flat declaration text, deduplicated by
//! content hash, compiled through a rule pipeline, and handed to a
//! stylesheet sink. All state lives in an explicit [`Styler`] context, so
//! independent contexts (tests, multi-tenant server rendering) never share
//! caches.

#![warn(missing_docs)]

pub mod error;
pub mod hydration;
pub mod normalize;
pub mod pipeline;
pub mod serialize;
pub mod sheet;
pub mod style;
pub mod styler;

pub use error::StyleError;
pub use hydration::HydrationPayload;
pub use pipeline::{RuleMode, RulePipeline};
pub use serialize::serialize;
pub use sheet::{MemorySheet, Sheet};
pub use style::{Fragment, Style, Template, Value};
pub use styler::Styler;
