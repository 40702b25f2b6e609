//! The two-mode rule pipeline between the compiler and the sheet.
//!
//! The pipeline wraps a [`RuleCompiler`] with a phase-aware plugin that
//! turns compilation events into an explicit emit-or-skip decision per
//! fragment. Ordinary rules and keyframe blocks need different decisions,
//! so one configured pipeline exists per mode.

use weft_compiler::{CompileError, Phase, PluginEvent, RuleCompiler};

use crate::sheet::Sheet;

/// Which emission decision a pipeline applies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RuleMode {
    /// Ordinary rules: emit each finished selector block and each at-rule.
    Ordinary,
    /// Keyframe blocks: emit only the finished `@keyframes` at-rule, as a
    /// `-webkit-` prefixed duplicate followed by the unprefixed form.
    Keyframe,
}

/// A configured rule pipeline.
pub struct RulePipeline<C> {
    compiler: C,
    mode: RuleMode,
}

impl<C: RuleCompiler> RulePipeline<C> {
    /// Creates a pipeline over the given compiler and mode.
    pub fn new(compiler: C, mode: RuleMode) -> Self {
        Self { compiler, mode }
    }

    /// Compiles `body` scoped under `selector`, inserting every emitted
    /// fragment into `sheet`.
    pub fn run(&self, selector: &str, body: &str, sheet: &dyn Sheet) -> Result<(), CompileError> {
        let mode = self.mode;
        self.compiler.compile(selector, body, &mut |event| {
            for rule in decide(mode, &event) {
                sheet.insert(&rule);
            }
        })?;
        Ok(())
    }
}

/// The emit-or-skip decision for one compilation event.
///
/// A boundary fragment is emitted if and only if it will not be re-emitted
/// with more context attached: fragments whose innermost selector equals the
/// parent's innermost are inside an at-rule, whose own `RuleReady` event
/// carries the full wrapped text.
fn decide(mode: RuleMode, event: &PluginEvent<'_>) -> Vec<String> {
    match mode {
        RuleMode::Ordinary => match event.phase {
            Phase::NestedRuleBoundary => {
                if event.selectors.first() == event.parents.first() {
                    Vec::new()
                } else {
                    vec![joined_rule(event)]
                }
            }
            Phase::RuleReady => vec![joined_rule(event)],
            _ => Vec::new(),
        },
        RuleMode::Keyframe => match event.phase {
            Phase::RuleReady => {
                let Some(header) = event.selectors.first() else {
                    return Vec::new();
                };
                let prefixed = header.replacen("keyframes", "-webkit-keyframes", 1);
                vec![
                    format!("{prefixed}{{{}}}", event.content),
                    format!("{header}{{{}}}", event.content),
                ]
            }
            _ => Vec::new(),
        },
    }
}

fn joined_rule(event: &PluginEvent<'_>) -> String {
    format!("{}{{{}}}", event.selectors.join(","), event.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::MemorySheet;
    use weft_compiler::StyleCompiler;

    fn ordinary() -> RulePipeline<StyleCompiler> {
        RulePipeline::new(StyleCompiler::new(), RuleMode::Ordinary)
    }

    fn keyframe() -> RulePipeline<StyleCompiler> {
        RulePipeline::new(StyleCompiler::new(), RuleMode::Keyframe)
    }

    #[test]
    fn scoped_rule_is_emitted() {
        let sheet = MemorySheet::new();
        ordinary().run(".x", "color:red;", &sheet).unwrap();
        assert_eq!(sheet.rules(), vec![".x{color:red;}"]);
    }

    #[test]
    fn nested_rules_emit_in_source_order() {
        let sheet = MemorySheet::new();
        ordinary()
            .run(".x", "color:red;&:hover{color:blue;}", &sheet)
            .unwrap();
        assert_eq!(
            sheet.rules(),
            vec![".x{color:red;}", ".x:hover{color:blue;}"]
        );
    }

    #[test]
    fn at_rule_content_is_emitted_once_wrapped() {
        let sheet = MemorySheet::new();
        ordinary()
            .run(".x", "@media print{color:red;}", &sheet)
            .unwrap();
        assert_eq!(sheet.rules(), vec!["@media print{.x{color:red;}}"]);
    }

    #[test]
    fn empty_scope_emits_global_rules() {
        let sheet = MemorySheet::new();
        ordinary().run("", "body{margin:0;}", &sheet).unwrap();
        assert_eq!(sheet.rules(), vec!["body{margin:0;}"]);
    }

    #[test]
    fn keyframe_mode_emits_webkit_duplicate_first() {
        let sheet = MemorySheet::new();
        keyframe()
            .run("", "@keyframes spin{from{opacity:0;}to{opacity:1;}}", &sheet)
            .unwrap();
        assert_eq!(
            sheet.rules(),
            vec![
                "@-webkit-keyframes spin{from{opacity:0;}to{opacity:1;}}",
                "@keyframes spin{from{opacity:0;}to{opacity:1;}}",
            ]
        );
    }

    #[test]
    fn keyframe_mode_ignores_ordinary_rules() {
        let sheet = MemorySheet::new();
        keyframe().run(".x", "color:red;", &sheet).unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn compile_errors_propagate() {
        let sheet = MemorySheet::new();
        let err = ordinary().run(".x", "span{", &sheet);
        assert!(err.is_err());
    }
}
