//! The styling context and its public operations.
//!
//! A `Styler` owns the registration cache (identifier to serialized text),
//! the insertion cache (content hashes already emitted), a stylesheet sink,
//! and one configured rule pipeline per mode. All operations are
//! synchronous and idempotent with respect to the insertion cache; the two
//! caches sit behind a single mutex held for the duration of one operation,
//! which preserves the at-most-once-insertion invariant under parallelism.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use weft_common::StyleHash;
use weft_compiler::{CompilerOptions, StyleCompiler};

use crate::error::StyleError;
use crate::hydration::HydrationPayload;
use crate::pipeline::{RuleMode, RulePipeline};
use crate::serialize::{serialize, Registry};
use crate::sheet::{MemorySheet, Sheet};
use crate::style::Style;

#[derive(Default)]
struct Caches {
    registered: Registry,
    inserted: HashSet<String>,
}

/// An isolated styling context.
///
/// Contexts are independent: two `Styler`s never share caches or sinks, so
/// tests and multi-tenant server rendering can each run their own. The sink
/// is injected at construction and re-injected by [`flush`](Self::flush).
pub struct Styler {
    sheet: Arc<dyn Sheet>,
    ordinary: RulePipeline<StyleCompiler>,
    keyframe: RulePipeline<StyleCompiler>,
    caches: Mutex<Caches>,
}

impl Styler {
    /// Creates a context backed by a fresh in-memory sheet.
    pub fn new() -> Self {
        Self::with_sheet(Arc::new(MemorySheet::new()))
    }

    /// Creates a context over an externally owned sink.
    pub fn with_sheet(sheet: Arc<dyn Sheet>) -> Self {
        Self::with_options(sheet, CompilerOptions::default())
    }

    /// Creates a context with explicit compiler options.
    pub fn with_options(sheet: Arc<dyn Sheet>, options: CompilerOptions) -> Self {
        sheet.inject();
        Self {
            sheet,
            ordinary: RulePipeline::new(
                StyleCompiler::with_options(options.clone()),
                RuleMode::Ordinary,
            ),
            keyframe: RulePipeline::new(StyleCompiler::with_options(options), RuleMode::Keyframe),
            caches: Mutex::new(Caches::default()),
        }
    }

    /// Returns the sink this context drives.
    pub fn sheet(&self) -> &Arc<dyn Sheet> {
        &self.sheet
    }

    /// Produces a class identifier for a style, inserting its rules once.
    ///
    /// The serialized text is registered under `css-<hash>` so later inputs
    /// can embed it by identifier, then compiled scoped to `.css-<hash>`
    /// unless that identifier was already inserted (or hydrated). Calling
    /// twice with equal input returns the same identifier and performs the
    /// insertion side effect only once.
    pub fn css(&self, style: &Style) -> Result<String, StyleError> {
        let mut caches = self.caches.lock().unwrap();
        let text = serialize(style, &caches.registered);
        let class = format!("css-{}", StyleHash::of(&text));

        if !caches.registered.contains_key(&class) {
            caches.registered.insert(class.clone(), text.clone());
        }
        if !caches.inserted.contains(&class) {
            self.ordinary
                .run(&format!(".{class}"), &text, self.sheet.as_ref())?;
            caches.inserted.insert(class.clone());
            log::trace!("inserted rules for {class}");
        }
        Ok(class)
    }

    /// Inserts a style at global scope (no generated class) once.
    pub fn inject_global(&self, style: &Style) -> Result<(), StyleError> {
        let mut caches = self.caches.lock().unwrap();
        let text = serialize(style, &caches.registered);
        let hash = StyleHash::of(&text).to_string();

        if !caches.inserted.contains(&hash) {
            self.ordinary.run("", &text, self.sheet.as_ref())?;
            caches.inserted.insert(hash);
        }
        Ok(())
    }

    /// Produces an animation name for a keyframe style, inserting the
    /// `@keyframes` rule (with its `-webkit-` duplicate) once.
    pub fn keyframes(&self, style: &Style) -> Result<String, StyleError> {
        let mut caches = self.caches.lock().unwrap();
        let text = serialize(style, &caches.registered);
        let hash = StyleHash::of(&text).to_string();
        let name = format!("animation-{hash}");

        if !caches.inserted.contains(&hash) {
            let body = format!("@keyframes {name}{{{text}}}");
            self.keyframe.run("", &body, self.sheet.as_ref())?;
            caches.inserted.insert(hash);
        }
        Ok(name)
    }

    /// Inserts an `@font-face` rule once.
    ///
    /// Font-face bodies need no selector rewriting, so the text goes to the
    /// sink directly instead of through the pipeline.
    pub fn font_face(&self, style: &Style) -> Result<(), StyleError> {
        let mut caches = self.caches.lock().unwrap();
        let text = serialize(style, &caches.registered);
        let hash = StyleHash::of(&text).to_string();

        if !caches.inserted.contains(&hash) {
            self.sheet.insert(&format!("@font-face {{{text}}}"));
            caches.inserted.insert(hash);
        }
        Ok(())
    }

    /// Marks identifiers as already inserted without compiling anything.
    ///
    /// Used to reconcile with rules a prior rendering pass emitted into the
    /// document: this context's first occurrence of each identifier becomes
    /// a no-op.
    pub fn hydrate<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut caches = self.caches.lock().unwrap();
        for id in ids {
            caches.inserted.insert(id.into());
        }
    }

    /// Marks every identifier in a hydration payload as inserted.
    pub fn hydrate_payload(&self, payload: &HydrationPayload) {
        self.hydrate(payload.ids.iter().cloned());
    }

    /// Clears the sink's managed content and both caches, then re-injects
    /// the sink. A full reset between isolated test or rendering contexts.
    pub fn flush(&self) {
        let mut caches = self.caches.lock().unwrap();
        self.sheet.flush();
        caches.registered.clear();
        caches.inserted.clear();
        self.sheet.inject();
        log::debug!("styler flushed");
    }

    /// Returns a snapshot of the registration cache, keyed by identifier.
    ///
    /// Tooling uses this to enumerate already-produced styles, e.g. for
    /// critical-CSS extraction out of a server render.
    pub fn registered(&self) -> HashMap<String, String> {
        self.caches.lock().unwrap().registered.clone()
    }

    /// Returns the sorted insertion-cache key set.
    pub fn inserted(&self) -> Vec<String> {
        let caches = self.caches.lock().unwrap();
        let mut ids: Vec<String> = caches.inserted.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Snapshots the insertion cache for a future process's hydration.
    pub fn hydration_payload(&self) -> HydrationPayload {
        HydrationPayload::new(self.inserted())
    }
}

impl Default for Styler {
    fn default() -> Self {
        Self::new()
    }
}
