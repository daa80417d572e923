// rule.rs — Policy rule value types and well-known tool patterns.
//
// A rule is a (pattern, action) pair. Patterns are regular expressions
// over tool names; a verbatim name is an exact match, `name_.*` a family
// match, `.*` everything. Rules carry no intrinsic priority — position in
// the compiled sequence is the only precedence signal.
//
// The fixed patterns below are ordinary regexes sharing the same
// evaluation path as user-supplied ones; nothing special-cases them.

use serde::{Deserialize, Serialize};

/// Matches every tool name.
pub const MATCH_ALL: &str = ".*";

/// The subagent-spawning task tool.
pub const TASK_TOOL: &str = "task";

/// The task tool family (e.g. `task_background`, `task_status`).
pub const TASK_TOOL_FAMILY: &str = "task_.*";

/// The agent-switch (routing) tool. Default-closed.
pub const SWITCH_AGENT_TOOL: &str = "switch_agent";

/// The ask-for-user-input tool. Hard-denied for subagents.
pub const ASK_USER_TOOL: &str = "ask_user_question";

/// The plan-proposal completion tool (plan-like subagents).
pub const PROPOSE_PLAN_TOOL: &str = "propose_plan";

/// The generic report-completion tool (all other subagents).
pub const AGENT_REPORT_TOOL: &str = "agent_report";

/// What a matching rule does to a tool's resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// The tool is offered to the model.
    Enable,
    /// The tool is withheld; also clears any earlier Require.
    Disable,
    /// The tool must be invoked before free-text output is accepted.
    /// Implies Enable.
    Require,
}

impl std::fmt::Display for RuleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleAction::Enable => write!(f, "enable"),
            RuleAction::Disable => write!(f, "disable"),
            RuleAction::Require => write!(f, "require"),
        }
    }
}

/// A single policy rule — immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyRule {
    /// Regular expression over tool names (matched full-string).
    pub pattern: String,
    /// What to do with tools the pattern matches.
    pub action: RuleAction,
}

impl PolicyRule {
    pub fn enable(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RuleAction::Enable,
        }
    }

    pub fn disable(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RuleAction::Disable,
        }
    }

    pub fn require(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RuleAction::Require,
        }
    }
}

impl std::fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.action, self.pattern)
    }
}
