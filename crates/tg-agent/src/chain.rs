// chain.rs — Resolved agent inheritance chains.
//
// The agent-definition loader resolves an agent's `extends` graph into a
// flat, child-first chain: the directly selected agent first, its base
// next, up to the root. The policy compiler traverses that chain
// base-first so that more specific layers append later rules and therefore
// override more general ones.
//
// Whether a chain is "plan-like" (a planning agent flavor, which changes
// which turn-completion tool a subagent gets) is classified by the
// resolver and carried here as a flag.

use crate::config::AgentToolConfig;

/// One agent-like entity in a resolved chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLayer {
    /// The agent's name (as declared in its definition file).
    pub name: String,
    /// The agent's `tools` block, if it declared one.
    pub tools: Option<AgentToolConfig>,
}

impl ChainLayer {
    /// A layer with no tool configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: None,
        }
    }

    /// A layer carrying a `tools` block.
    pub fn with_tools(name: impl Into<String>, tools: AgentToolConfig) -> Self {
        Self {
            name: name.into(),
            tools: Some(tools),
        }
    }
}

/// A resolved inheritance chain, child-first.
///
/// Index 0 is the selected agent; the last index is the root base agent.
/// The chain is supplied fully ordered by the external inheritance
/// resolver — this type only exposes traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    layers: Vec<ChainLayer>,
    plan_like: bool,
}

impl ResolvedChain {
    /// Wrap an already-ordered (child-first) list of layers.
    ///
    /// `plan_like` is the resolver's classification of the chain's agent
    /// flavor; it decides which completion tool a subagent is offered.
    pub fn new(layers: Vec<ChainLayer>, plan_like: bool) -> Self {
        Self { layers, plan_like }
    }

    /// A single-agent chain (no inheritance).
    pub fn single(layer: ChainLayer) -> Self {
        Self::new(vec![layer], false)
    }

    /// The layers in child-first order.
    pub fn layers(&self) -> &[ChainLayer] {
        &self.layers
    }

    /// Traverse base-first (root base agent first, selected agent last).
    ///
    /// This is the order the policy compiler consumes: later layers append
    /// later rules and win under last-match-wins evaluation.
    pub fn base_first(&self) -> impl Iterator<Item = &ChainLayer> {
        self.layers.iter().rev()
    }

    /// The directly selected agent (the most specific layer), if any.
    pub fn selected(&self) -> Option<&ChainLayer> {
        self.layers.first()
    }

    /// Whether the resolver classified this chain as a planning flavor.
    pub fn is_plan_like(&self) -> bool {
        self.plan_like
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}
