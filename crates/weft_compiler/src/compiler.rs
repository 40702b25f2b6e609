//! The default nesting-aware rule compiler.
//!
//! Compilation is a single recursive pass over the rule text. Each selector
//! block accumulates declarations and flushes them as a standalone rule
//! whenever a nested block begins and once when the block ends, so compiled
//! output preserves source order (a base rule precedes its nested rules).
//! At-rule blocks compile their contents into a separate buffer and report
//! the finished text as one [`Phase::RuleReady`] event.

use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::phase::{Phase, PluginEvent};

/// A compiler that parses scoped rule text and reports structural fragments
/// to a plugin callback.
pub trait RuleCompiler {
    /// Compiles `body` scoped under `selector`.
    ///
    /// Returns the fully compiled CSS text. The plugin is invoked once per
    /// structural fragment; see [`PluginEvent`] for the payload.
    fn compile(
        &self,
        selector: &str,
        body: &str,
        plugin: &mut dyn FnMut(PluginEvent<'_>),
    ) -> Result<String, CompileError>;
}

/// Configuration for [`StyleCompiler`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Strip `/* ... */` comments before parsing. On by default.
    pub strip_comments: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            strip_comments: true,
        }
    }
}

/// The default [`RuleCompiler`] implementation.
pub struct StyleCompiler {
    options: CompilerOptions,
}

impl StyleCompiler {
    /// Creates a compiler with default options.
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Creates a compiler with the given options.
    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }
}

impl Default for StyleCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCompiler for StyleCompiler {
    fn compile(
        &self,
        selector: &str,
        body: &str,
        plugin: &mut dyn FnMut(PluginEvent<'_>),
    ) -> Result<String, CompileError> {
        let src = if self.options.strip_comments {
            strip_comments(body)
        } else {
            body.to_string()
        };

        let root = vec![selector.to_string()];
        let root_parents = vec![String::new()];
        plugin(PluginEvent {
            phase: Phase::Preparation,
            content: &src,
            selectors: &root,
            parents: &root_parents,
        });

        let mut scanner = Scanner { src: &src, pos: 0 };
        let mut out = String::new();
        scanner.compile_block(
            &root,
            &root_parents,
            BlockMode::Selector,
            false,
            true,
            &mut out,
            plugin,
        )?;
        Ok(out)
    }
}

/// How child block headers are resolved against the enclosing selectors.
#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockMode {
    /// Ordinary nesting: `&` substitution, descendant joining, comma
    /// cartesian expansion.
    Selector,
    /// Inside `@keyframes`: headers (`from`, `to`, percentages) stay literal.
    Keyframes,
}

/// Delimiter that terminated a scanned segment.
enum Delim {
    OpenBrace,
    CloseBrace,
    Semicolon,
    Eof,
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Compiles one block's contents, writing finished rules to `out`.
    ///
    /// `selectors` is the resolved selector stack for this block and
    /// `parents` the enclosing block's stack. `inside_at` marks that an
    /// at-rule encloses this block, in which case boundary events carry
    /// `parents == selectors` so consumers skip them.
    #[allow(clippy::too_many_arguments)]
    fn compile_block(
        &mut self,
        selectors: &[String],
        parents: &[String],
        mode: BlockMode,
        inside_at: bool,
        root: bool,
        out: &mut String,
        plugin: &mut dyn FnMut(PluginEvent<'_>),
    ) -> Result<(), CompileError> {
        let mut decls = String::new();
        loop {
            let (segment, delim, delim_pos) = self.read_segment()?;
            match delim {
                Delim::Semicolon => {
                    push_declaration(segment, selectors, parents, inside_at, &mut decls, plugin);
                }
                Delim::OpenBrace => {
                    flush(selectors, parents, inside_at, &mut decls, out, plugin);
                    let header = segment.trim();
                    if header.starts_with('@') {
                        self.compile_at_rule(header, selectors, inside_at, out, plugin)?;
                    } else {
                        let resolved = resolve_selectors(header, selectors, mode);
                        self.compile_block(
                            &resolved,
                            selectors,
                            mode,
                            inside_at,
                            false,
                            out,
                            &mut *plugin,
                        )?;
                    }
                }
                Delim::CloseBrace => {
                    if root {
                        return Err(CompileError::UnbalancedBlock {
                            position: delim_pos,
                        });
                    }
                    push_declaration(segment, selectors, parents, inside_at, &mut decls, plugin);
                    flush(selectors, parents, inside_at, &mut decls, out, plugin);
                    return Ok(());
                }
                Delim::Eof => {
                    if !root {
                        return Err(CompileError::UnbalancedBlock {
                            position: delim_pos,
                        });
                    }
                    push_declaration(segment, selectors, parents, inside_at, &mut decls, plugin);
                    flush(selectors, parents, inside_at, &mut decls, out, plugin);
                    return Ok(());
                }
            }
        }
    }

    /// Compiles an at-rule block and reports it as a single `RuleReady`
    /// event. At-rules nested inside another at-rule are carried as literal
    /// text of the enclosing at-rule instead of firing their own event.
    fn compile_at_rule(
        &mut self,
        header: &str,
        selectors: &[String],
        inside_at: bool,
        out: &mut String,
        plugin: &mut dyn FnMut(PluginEvent<'_>),
    ) -> Result<(), CompileError> {
        let keyword = header.split_whitespace().next().unwrap_or(header);
        let mode = if keyword.ends_with("keyframes") {
            BlockMode::Keyframes
        } else {
            BlockMode::Selector
        };

        let mut inner = String::new();
        self.compile_block(selectors, selectors, mode, true, false, &mut inner, &mut *plugin)?;

        if !inside_at {
            let header_stack = vec![header.to_string()];
            plugin(PluginEvent {
                phase: Phase::RuleReady,
                content: &inner,
                selectors: &header_stack,
                parents: selectors,
            });
        }

        out.push_str(header);
        out.push('{');
        out.push_str(&inner);
        out.push('}');
        Ok(())
    }

    /// Reads text up to the next top-level `{`, `}`, or `;`, honoring
    /// quotes, parentheses, and brackets.
    fn read_segment(&mut self) -> Result<(&'a str, Delim, usize), CompileError> {
        let src = self.src;
        let bytes = src.as_bytes();
        let start = self.pos;
        let mut paren_depth = 0usize;
        let mut bracket_depth = 0usize;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            match b {
                b'"' | b'\'' => self.skip_string(b)?,
                b'(' => {
                    paren_depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'[' => {
                    bracket_depth += 1;
                    self.pos += 1;
                }
                b']' => {
                    bracket_depth = bracket_depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'{' | b'}' | b';' if paren_depth == 0 && bracket_depth == 0 => {
                    let delim_pos = self.pos;
                    self.pos += 1;
                    let delim = match b {
                        b'{' => Delim::OpenBrace,
                        b'}' => Delim::CloseBrace,
                        _ => Delim::Semicolon,
                    };
                    return Ok((&src[start..delim_pos], delim, delim_pos));
                }
                _ => self.pos += 1,
            }
        }
        Ok((&src[start..], Delim::Eof, self.pos))
    }

    /// Consumes a quoted string starting at the current position.
    fn skip_string(&mut self, quote: u8) -> Result<(), CompileError> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        self.pos += 1;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(CompileError::UnterminatedString { position: start })
    }
}

/// Appends one declaration to the pending buffer, reporting it.
fn push_declaration(
    segment: &str,
    selectors: &[String],
    parents: &[String],
    inside_at: bool,
    decls: &mut String,
    plugin: &mut dyn FnMut(PluginEvent<'_>),
) {
    let decl = segment.trim();
    if decl.is_empty() {
        return;
    }
    let event_parents = if inside_at { selectors } else { parents };
    plugin(PluginEvent {
        phase: Phase::Declaration,
        content: decl,
        selectors,
        parents: event_parents,
    });
    decls.push_str(decl);
    decls.push(';');
}

/// Flushes pending declarations as one rule, reporting the boundary.
fn flush(
    selectors: &[String],
    parents: &[String],
    inside_at: bool,
    decls: &mut String,
    out: &mut String,
    plugin: &mut dyn FnMut(PluginEvent<'_>),
) {
    if decls.is_empty() {
        return;
    }
    let event_parents = if inside_at { selectors } else { parents };
    plugin(PluginEvent {
        phase: Phase::NestedRuleBoundary,
        content: decls,
        selectors,
        parents: event_parents,
    });
    out.push_str(&selectors.join(","));
    out.push('{');
    out.push_str(decls);
    out.push('}');
    decls.clear();
}

/// Resolves a child block header against the enclosing selectors.
fn resolve_selectors(header: &str, parents: &[String], mode: BlockMode) -> Vec<String> {
    let mut resolved = Vec::new();
    for part in split_top_level_commas(header) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match mode {
            BlockMode::Keyframes => resolved.push(part.to_string()),
            BlockMode::Selector => {
                for parent in parents {
                    resolved.push(join_selector(parent, part));
                }
            }
        }
    }
    resolved
}

/// Joins one parent selector with one child part.
fn join_selector(parent: &str, part: &str) -> String {
    if part.contains('&') {
        part.replace('&', parent)
    } else if parent.is_empty() {
        part.to_string()
    } else {
        format!("{parent} {part}")
    }
}

/// Splits a selector list on commas outside quotes, parens, and brackets.
fn split_top_level_commas(header: &str) -> Vec<&str> {
    let bytes = header.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            q @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() {
                    match bytes[pos] {
                        b'\\' => pos += 2,
                        b if b == q => {
                            pos += 1;
                            break;
                        }
                        _ => pos += 1,
                    }
                }
            }
            b'(' => {
                paren_depth += 1;
                pos += 1;
            }
            b')' => {
                paren_depth = paren_depth.saturating_sub(1);
                pos += 1;
            }
            b'[' => {
                bracket_depth += 1;
                pos += 1;
            }
            b']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                pos += 1;
            }
            b',' if paren_depth == 0 && bracket_depth == 0 => {
                parts.push(&header[start..pos]);
                pos += 1;
                start = pos;
            }
            _ => pos += 1,
        }
    }
    parts.push(&header[start..header.len().min(pos)]);
    parts
}

/// Removes `/* ... */` comments outside quoted strings.
fn strip_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut chunk_start = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            q @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() {
                    match bytes[pos] {
                        b'\\' => pos += 2,
                        b if b == q => {
                            pos += 1;
                            break;
                        }
                        _ => pos += 1,
                    }
                }
            }
            b'/' if pos + 1 < bytes.len() && bytes[pos + 1] == b'*' => {
                out.push_str(&src[chunk_start..pos]);
                pos += 2;
                while pos + 1 < bytes.len() && !(bytes[pos] == b'*' && bytes[pos + 1] == b'/') {
                    pos += 1;
                }
                pos = if pos + 1 < bytes.len() {
                    pos + 2
                } else {
                    bytes.len()
                };
                chunk_start = pos;
            }
            _ => pos += 1,
        }
    }
    out.push_str(&src[chunk_start..src.len().min(pos.max(chunk_start))]);
    out
}
