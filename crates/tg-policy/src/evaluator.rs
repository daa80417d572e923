// evaluator.rs — Compiled policies and tool-name resolution.
//
// A CompiledPolicy is the ordered rule sequence produced for one turn.
// Resolution is a last-match-wins linear scan: every rule whose pattern
// matches the candidate name overwrites the running resolution. There is
// no longest-prefix or most-specific-match scheme — position is the only
// precedence signal, which makes the compiler's ordering the entire source
// of correctness.
//
// Patterns are compiled to regexes exactly once, at construction, and
// matched full-string (`^(?:pattern)$`). Built-in and user-supplied
// patterns share this one path. An invalid pattern is rejected at
// construction with a diagnostic naming it — never skipped, since a
// skipped rule would silently under-restrict.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::rule::{PolicyRule, RuleAction};

/// The resolved status of one tool name for one turn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResolution {
    /// Whether the tool is offered to the model this turn.
    pub enabled: bool,
    /// Whether the tool must be invoked before free-text output is
    /// accepted. `required` implies `enabled`.
    pub required: bool,
}

impl ToolResolution {
    /// The safe default: not offered, not required.
    pub const DISABLED: Self = Self {
        enabled: false,
        required: false,
    };
}

/// One rule plus its pre-compiled matcher.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: PolicyRule,
    matcher: Regex,
}

/// The full ordered rule sequence for one turn.
///
/// Built fresh per compilation by [`PolicyCompiler`], owned by the caller,
/// and discarded after the turn. Immutable after construction, so many
/// tool names (or threads) may resolve against the same policy without
/// coordination.
///
/// [`PolicyCompiler`]: crate::compiler::PolicyCompiler
#[derive(Debug, Clone)]
pub struct CompiledPolicy {
    rules: Vec<CompiledRule>,
}

impl CompiledPolicy {
    /// Build a policy from an ordered rule list, compiling every pattern.
    ///
    /// [`PolicyCompiler::compile`] is the normal producer; this is public
    /// so callers can evaluate hand-built sequences (e.g. in tests).
    ///
    /// [`PolicyCompiler::compile`]: crate::compiler::PolicyCompiler::compile
    pub fn from_rules(rules: Vec<PolicyRule>) -> Result<Self, PolicyError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            // Anchor for full-string matching: a verbatim tool name is an
            // exact match, `name_.*` a family match, `.*` everything.
            let matcher = Regex::new(&format!("^(?:{})$", rule.pattern)).map_err(|err| {
                PolicyError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    reason: err.to_string(),
                }
            })?;
            compiled.push(CompiledRule { rule, matcher });
        }
        Ok(Self { rules: compiled })
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve one tool name against this policy.
    ///
    /// Pure function of the policy and the name; no shared mutable state.
    /// A name no rule matches resolves to disabled — structurally
    /// unreachable past the compiler's deny-all baseline, but the safe
    /// default regardless.
    pub fn resolve(&self, tool_name: &str) -> ToolResolution {
        let mut resolution = ToolResolution::DISABLED;
        for compiled in &self.rules {
            if !compiled.matcher.is_match(tool_name) {
                continue;
            }
            apply(&mut resolution, compiled.rule.action);
        }
        resolution
    }

    /// Resolve one tool name and record every rule that matched.
    ///
    /// Same scan as [`resolve`](Self::resolve); the trace serializes for
    /// audit logging so the decision trail stays observable.
    pub fn resolve_with_trace(&self, tool_name: &str) -> ResolutionTrace {
        let mut resolution = ToolResolution::DISABLED;
        let mut matched = Vec::new();
        for (index, compiled) in self.rules.iter().enumerate() {
            if !compiled.matcher.is_match(tool_name) {
                continue;
            }
            apply(&mut resolution, compiled.rule.action);
            matched.push(MatchedRule {
                index,
                pattern: compiled.rule.pattern.clone(),
                action: compiled.rule.action,
            });
        }
        ResolutionTrace {
            tool_name: tool_name.to_string(),
            resolution,
            matched,
        }
    }

    /// Resolve every name in a registry listing.
    pub fn resolve_all<'a, I>(&self, tool_names: I) -> Vec<(&'a str, ToolResolution)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tool_names
            .into_iter()
            .map(|name| (name, self.resolve(name)))
            .collect()
    }

    /// The names from a registry listing that are offered this turn.
    pub fn enabled_tools<'a, I>(&self, tool_names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tool_names
            .into_iter()
            .filter(|name| self.resolve(name).enabled)
            .collect()
    }

    /// The names from a registry listing that must be invoked this turn.
    pub fn required_tools<'a, I>(&self, tool_names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tool_names
            .into_iter()
            .filter(|name| self.resolve(name).required)
            .collect()
    }
}

/// Fold one matching rule into the running resolution (last match wins).
fn apply(resolution: &mut ToolResolution, action: RuleAction) {
    match action {
        RuleAction::Enable => resolution.enabled = true,
        RuleAction::Disable => {
            resolution.enabled = false;
            // A later Disable supersedes an earlier Require.
            resolution.required = false;
        }
        RuleAction::Require => {
            resolution.enabled = true;
            resolution.required = true;
        }
    }
}

/// One matching rule recorded during a traced resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedRule {
    /// Position in the compiled sequence.
    pub index: usize,
    /// The rule's pattern as authored.
    pub pattern: String,
    /// The rule's action.
    pub action: RuleAction,
}

/// Full record of one traced resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionTrace {
    /// The candidate tool name.
    pub tool_name: String,
    /// The final resolution.
    pub resolution: ToolResolution,
    /// Every rule that matched, in evaluation order.
    pub matched: Vec<MatchedRule>,
}
