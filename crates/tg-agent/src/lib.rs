//! # tg-agent
//!
//! Inheritance-chain and tool-configuration types for ToolGate.
//!
//! These are the inbound boundary types of the policy engine: the external
//! agent-definition loader resolves an agent's inheritance graph into a
//! [`ResolvedChain`], and each layer of that chain carries the optional
//! [`AgentToolConfig`] declared in its definition file. The policy compiler
//! in `tg-policy` only traverses these values — it never loads, parses, or
//! orders them itself.
//!
//! ## Key invariants
//!
//! - **Child-first ordering**: a [`ResolvedChain`] lists the selected agent
//!   first, its base agent next, and so on to the root.
//! - **Plan-like is externally derived**: whether a chain represents a
//!   planning agent flavor is classified by the resolver and carried as a
//!   flag, never re-derived here.

pub mod chain;
pub mod config;

pub use chain::{ChainLayer, ResolvedChain};
pub use config::AgentToolConfig;
