// config.rs — Per-layer tool configuration.
//
// Each agent definition may declare a `tools` block adding or removing
// tool-name patterns relative to whatever its base agent granted. The
// entries are free-form regular-expression strings; no escaping is applied,
// so a verbatim tool name is an exact match and `name_.*` is a family
// match. Pattern validity is checked by the policy compiler, not here.

use serde::{Deserialize, Serialize};

/// The `tools` block of one agent definition — one inheritance layer's
/// contribution to the effective tool set.
///
/// This is the structured `tools` block in an agent's YAML definition:
/// ```yaml
/// tools:
///   add:
///     - "file_edit_.*"
///     - "bash"
///   remove:
///     - "ask_user_question"
/// ```
///
/// `add` entries become Enable rules and `remove` entries become Disable
/// rules when compiled. Within one layer, removes win over adds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentToolConfig {
    /// Patterns of tools this layer grants, in declaration order.
    #[serde(default)]
    pub add: Vec<String>,

    /// Patterns of tools this layer revokes, in declaration order.
    #[serde(default)]
    pub remove: Vec<String>,
}

impl AgentToolConfig {
    /// Whether this config contributes nothing (both lists empty).
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}
