//! # tg-policy
//!
//! Tool-access policy resolution for ToolGate.
//!
//! Decides, for a single assistant turn, which named tools an agent may
//! invoke, which are forbidden, and which are mandatory. The
//! [`PolicyCompiler`] merges an agent inheritance chain with per-turn
//! [`RuntimeFlags`] into a [`CompiledPolicy`] — an ordered rule sequence —
//! and [`CompiledPolicy::resolve`] answers `{enabled, required}` for each
//! candidate tool name.
//!
//! ## Key invariants
//!
//! - **Deny by default**: every compiled policy begins with a universal
//!   Disable rule; a name no rule matches resolves to disabled.
//! - **Last match wins**: rule position is the sole precedence signal.
//! - **Runtime rules are final**: flag-derived rules are appended after
//!   all agent-derived rules, so agent configuration can never override a
//!   runtime safety constraint.
//! - **Fail-safe degradation**: contradictory flag combinations (e.g.
//!   require-switch for a subagent) are ignored with a warning, never an
//!   error.
//!
//! The engine is pure: no I/O, no caching, no shared mutable state. Each
//! `CompiledPolicy` is an independently owned value built fresh per turn.

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod rule;

pub use compiler::{PolicyCompiler, RuntimeFlags};
pub use error::PolicyError;
pub use evaluator::{CompiledPolicy, MatchedRule, ResolutionTrace, ToolResolution};
pub use rule::{PolicyRule, RuleAction};
