// compiler.rs — Policy Compiler.
//
// Compiles a resolved inheritance chain plus per-turn runtime flags into a
// CompiledPolicy. Runs once per turn (or whenever agent/runtime context
// changes); the evaluator then resolves every registry name against the
// result.
//
// The compiler:
// 1. Seeds the sequence with a deny-all baseline rule
// 2. Walks the chain base-first, appending each layer's adds then removes
// 3. Appends runtime-derived rules last, so agent configuration can never
//    override them
//
// The key invariant: rule position is the only precedence signal. Every
// ordering decision made here IS the policy.

use tracing::{debug, warn};

use tg_agent::ResolvedChain;

use crate::error::PolicyError;
use crate::evaluator::CompiledPolicy;
use crate::rule::{
    PolicyRule, AGENT_REPORT_TOOL, ASK_USER_TOOL, MATCH_ALL, PROPOSE_PLAN_TOOL, SWITCH_AGENT_TOOL,
    TASK_TOOL, TASK_TOOL_FAMILY,
};

/// Per-turn safety constraints supplied by the session/turn context.
///
/// Fields are independent; no combination is rejected. Contradictory
/// combinations degrade safely (see [`PolicyCompiler::compile`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFlags {
    /// The subject is a spawned subagent, not the top-level agent.
    pub is_subagent: bool,

    /// The turn sits at the subagent depth limit: the task tool and its
    /// family must be withheld to stop further nesting.
    pub disable_task_tools_for_depth: bool,

    /// The agent-switch tool may be offered this turn.
    pub enable_agent_switch_tool: bool,

    /// The agent-switch tool must be invoked before free-text output
    /// ("auto-router" mode). Only honored when switching is enabled and
    /// the subject is not a subagent.
    pub require_switch_agent_tool: bool,
}

/// The Policy Compiler — turns chain + flags into an ordered rule sequence.
pub struct PolicyCompiler;

impl PolicyCompiler {
    /// Compile the tool policy for one turn.
    ///
    /// Deterministic for identical inputs. Errors are configuration
    /// defects (empty chain, invalid pattern) and the caller should refuse
    /// to start the turn on them.
    pub fn compile(
        chain: &ResolvedChain,
        flags: &RuntimeFlags,
    ) -> Result<CompiledPolicy, PolicyError> {
        if chain.is_empty() {
            return Err(PolicyError::EmptyChain);
        }

        // Fail-safe guard: a require-switch request is honored only when
        // switching is enabled and the subject is not a subagent. Anything
        // else is ignored, not an error — the feature falls back to its
        // default-disabled state.
        let require_switch = flags.require_switch_agent_tool
            && flags.enable_agent_switch_tool
            && !flags.is_subagent;
        if flags.require_switch_agent_tool && !require_switch {
            warn!(
                enable_agent_switch_tool = flags.enable_agent_switch_tool,
                is_subagent = flags.is_subagent,
                "require_switch_agent_tool ignored"
            );
        }

        // Step 1: deny-by-default baseline. Every name matches this rule,
        // so "no rule matched" is structurally unreachable downstream.
        let mut rules = vec![PolicyRule::disable(MATCH_ALL)];

        // Step 2: agent layers, base-first, so child rules land later and
        // override under last-match-wins. Within a layer, adds precede
        // removes: a layer can grant and revoke, revocation winning.
        for layer in chain.base_first() {
            let Some(tools) = &layer.tools else {
                continue;
            };
            let before = rules.len();
            for pattern in &tools.add {
                let pattern = pattern.trim();
                if pattern.is_empty() {
                    continue;
                }
                rules.push(PolicyRule::enable(pattern));
            }
            for pattern in &tools.remove {
                let pattern = pattern.trim();
                if pattern.is_empty() {
                    continue;
                }
                rules.push(PolicyRule::disable(pattern));
            }
            debug!(
                layer = %layer.name,
                rules = rules.len() - before,
                "applied layer tool config"
            );
        }

        // Step 3: runtime-derived rules, always last, always winning.

        // 3a. Depth limit: no further subagent nesting.
        if flags.disable_task_tools_for_depth {
            rules.push(PolicyRule::disable(TASK_TOOL));
            rules.push(PolicyRule::disable(TASK_TOOL_FAMILY));
        }

        // 3b/3c. Agent switching is default-closed; only the runtime flags
        // reopen it, never agent configuration.
        rules.push(PolicyRule::disable(SWITCH_AGENT_TOOL));
        if flags.enable_agent_switch_tool && !flags.is_subagent {
            rules.push(PolicyRule::enable(SWITCH_AGENT_TOOL));
            if require_switch {
                rules.push(PolicyRule::require(SWITCH_AGENT_TOOL));
            }
        }

        // 3d. Hard subagent restrictions, plus exactly one valid
        // turn-completion tool per subagent flavor.
        if flags.is_subagent {
            rules.push(PolicyRule::disable(ASK_USER_TOOL));
            rules.push(PolicyRule::disable(SWITCH_AGENT_TOOL));
            if chain.is_plan_like() {
                rules.push(PolicyRule::enable(PROPOSE_PLAN_TOOL));
                rules.push(PolicyRule::disable(AGENT_REPORT_TOOL));
            } else {
                rules.push(PolicyRule::enable(AGENT_REPORT_TOOL));
                rules.push(PolicyRule::disable(PROPOSE_PLAN_TOOL));
            }
        }

        debug!(rules = rules.len(), "compiled turn tool policy");
        CompiledPolicy::from_rules(rules)
    }
}
