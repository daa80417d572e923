// turn_policy.rs — End-to-end turn policy scenarios.
//
// Exercises the full path an orchestration loop takes each turn:
//
//   1. The inheritance resolver hands over a child-first chain
//   2. The session context hands over runtime flags
//   3. PolicyCompiler::compile builds the turn's rule sequence
//   4. Every registry tool name is resolved to {enabled, required}
//
// The scenarios here are the contract the surrounding system depends on:
// inheritance overriding, runtime-flag supremacy, fail-safe degradation,
// and the one-completion-tool rule for subagents.

use tg_agent::{AgentToolConfig, ChainLayer, ResolvedChain};
use tg_policy::{PolicyCompiler, RuntimeFlags};

/// The registry a typical embedding system would resolve against.
const REGISTRY: &[&str] = &[
    "bash",
    "web_fetch",
    "file_edit_write",
    "file_edit_delete",
    "task",
    "task_background",
    "ask_user_question",
    "switch_agent",
    "propose_plan",
    "agent_report",
];

/// Base grants everything, then revokes the completion/input tools;
/// the child additionally revokes the file-edit family.
fn reviewer_chain(plan_like: bool) -> ResolvedChain {
    ResolvedChain::new(
        vec![
            ChainLayer::with_tools(
                "reviewer",
                AgentToolConfig {
                    add: vec![],
                    remove: vec!["file_edit_.*".to_string()],
                },
            ),
            ChainLayer::with_tools(
                "base",
                AgentToolConfig {
                    add: vec![".*".to_string()],
                    remove: vec![
                        "propose_plan".to_string(),
                        "ask_user_question".to_string(),
                    ],
                },
            ),
        ],
        plan_like,
    )
}

#[test]
fn inheritance_chain_overrides_compose() {
    let policy = PolicyCompiler::compile(&reviewer_chain(false), &RuntimeFlags::default()).unwrap();

    // Base revocations hold.
    assert!(!policy.resolve("propose_plan").enabled);
    assert!(!policy.resolve("ask_user_question").enabled);
    // Base grant-all holds for everything not revoked.
    assert!(policy.resolve("bash").enabled);
    assert!(policy.resolve("web_fetch").enabled);
    // Child family revocation holds over the base grant.
    assert!(!policy.resolve("file_edit_write").enabled);
    assert!(!policy.resolve("file_edit_delete").enabled);
}

#[test]
fn plan_like_subagent_turn() {
    let flags = RuntimeFlags {
        is_subagent: true,
        ..Default::default()
    };
    let policy = PolicyCompiler::compile(&reviewer_chain(true), &flags).unwrap();

    assert!(!policy.resolve("ask_user_question").enabled);
    assert!(!policy.resolve("switch_agent").enabled);
    assert!(policy.resolve("propose_plan").enabled);
    assert!(!policy.resolve("agent_report").enabled);
}

#[test]
fn auto_router_turn_requires_the_switch_tool() {
    let flags = RuntimeFlags {
        enable_agent_switch_tool: true,
        require_switch_agent_tool: true,
        ..Default::default()
    };
    let policy = PolicyCompiler::compile(&reviewer_chain(false), &flags).unwrap();

    let resolution = policy.resolve("switch_agent");
    assert!(resolution.enabled);
    assert!(resolution.required);
    assert_eq!(policy.required_tools(REGISTRY.iter().copied()), vec!["switch_agent"]);
}

#[test]
fn require_degrades_when_switching_is_disabled() {
    let flags = RuntimeFlags {
        require_switch_agent_tool: true,
        ..Default::default()
    };
    let policy = PolicyCompiler::compile(&reviewer_chain(false), &flags).unwrap();

    let resolution = policy.resolve("switch_agent");
    assert!(!resolution.enabled);
    assert!(!resolution.required);
    assert!(policy.required_tools(REGISTRY.iter().copied()).is_empty());
}

#[test]
fn subagent_hard_denies_beat_grant_all_config() {
    let chain = ResolvedChain::new(
        vec![ChainLayer::with_tools(
            "permissive",
            AgentToolConfig {
                add: vec![".*".to_string()],
                remove: vec![],
            },
        )],
        false,
    );
    let flags = RuntimeFlags {
        is_subagent: true,
        ..Default::default()
    };
    let policy = PolicyCompiler::compile(&chain, &flags).unwrap();

    assert!(!policy.resolve("switch_agent").enabled);
    assert!(!policy.resolve("ask_user_question").enabled);
}

#[test]
fn depth_limited_subagent_cannot_nest_further() {
    let chain = ResolvedChain::new(
        vec![ChainLayer::with_tools(
            "worker",
            AgentToolConfig {
                add: vec![".*".to_string()],
                remove: vec![],
            },
        )],
        false,
    );
    let flags = RuntimeFlags {
        is_subagent: true,
        disable_task_tools_for_depth: true,
        ..Default::default()
    };
    let policy = PolicyCompiler::compile(&chain, &flags).unwrap();

    assert!(!policy.resolve("task").enabled);
    assert!(!policy.resolve("task_background").enabled);
    assert!(policy.resolve("bash").enabled);
}

#[test]
fn registry_allow_list_for_a_default_turn() {
    let policy = PolicyCompiler::compile(&reviewer_chain(false), &RuntimeFlags::default()).unwrap();

    let enabled = policy.enabled_tools(REGISTRY.iter().copied());
    assert_eq!(
        enabled,
        vec!["bash", "web_fetch", "task", "task_background", "agent_report"]
    );
    assert!(policy.required_tools(REGISTRY.iter().copied()).is_empty());
}

#[test]
fn identical_inputs_yield_identical_turns() {
    let flags = RuntimeFlags {
        is_subagent: true,
        disable_task_tools_for_depth: true,
        ..Default::default()
    };
    let first = PolicyCompiler::compile(&reviewer_chain(true), &flags).unwrap();
    let second = PolicyCompiler::compile(&reviewer_chain(true), &flags).unwrap();

    for name in REGISTRY {
        assert_eq!(first.resolve(name), second.resolve(name), "{name}");
    }
}

#[test]
fn traced_resolution_explains_the_decision() {
    let policy = PolicyCompiler::compile(&reviewer_chain(false), &RuntimeFlags::default()).unwrap();

    let trace = policy.resolve_with_trace("file_edit_write");
    assert!(!trace.resolution.enabled);
    // Baseline deny, base grant-all, child family revoke — in that order.
    assert_eq!(trace.matched.len(), 3);
    assert_eq!(trace.matched[0].pattern, ".*");
    assert_eq!(trace.matched[1].pattern, ".*");
    assert_eq!(trace.matched[2].pattern, "file_edit_.*");
}
