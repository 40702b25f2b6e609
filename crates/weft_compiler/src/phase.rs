//! Compilation phases and the plugin event payload.

/// The compilation phase a plugin event was fired in.
///
/// Phases form a small closed enumeration mirroring the numeric context
/// codes of middleware-style CSS compilers. Consumers typically act on
/// [`NestedRuleBoundary`](Phase::NestedRuleBoundary) and
/// [`RuleReady`](Phase::RuleReady) and ignore the rest.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// The raw body is about to be parsed. Fired once per compilation.
    Preparation,
    /// A single declaration was parsed.
    Declaration,
    /// A selector block flushed its pending declarations as one rule. The
    /// same selector can flush more than once when declarations are
    /// interleaved with nested blocks.
    NestedRuleBoundary,
    /// An at-rule block finished compiling; its content is the fully
    /// compiled inner rule text.
    RuleReady,
}

impl Phase {
    /// Returns the numeric context code for this phase.
    pub fn code(self) -> i8 {
        match self {
            Phase::Preparation => -1,
            Phase::Declaration => 1,
            Phase::NestedRuleBoundary => 2,
            Phase::RuleReady => 3,
        }
    }
}

/// One structural fragment reported to the plugin during compilation.
#[derive(Debug)]
pub struct PluginEvent<'a> {
    /// The phase this event belongs to.
    pub phase: Phase,
    /// Fragment text: declarations for a boundary, compiled inner rules for
    /// an at-rule, a single declaration for [`Phase::Declaration`].
    pub content: &'a str,
    /// The current selector stack, innermost resolution first.
    pub selectors: &'a [String],
    /// The enclosing selector stack. Inside an at-rule block this equals
    /// `selectors`, which is how consumers detect that the fragment will be
    /// re-emitted as part of the at-rule's own event.
    pub parents: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_compiler_contract() {
        assert_eq!(Phase::Preparation.code(), -1);
        assert_eq!(Phase::Declaration.code(), 1);
        assert_eq!(Phase::NestedRuleBoundary.code(), 2);
        assert_eq!(Phase::RuleReady.code(), 3);
    }
}
