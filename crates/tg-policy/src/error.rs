// error.rs — Error types for the policy subsystem.

use thiserror::Error;

/// Errors that can occur during policy compilation.
///
/// Both variants are configuration defects: the caller should refuse to
/// start the turn rather than proceed with an under- or over-restricted
/// tool set. Re-invoking with the same inputs yields the same error, so
/// there is nothing to retry.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Compilation was requested with an empty inheritance chain.
    /// The chain must contain at least the selected agent.
    #[error("cannot compile a tool policy from an empty inheritance chain")]
    EmptyChain,

    /// A tool pattern failed to compile as a regular expression.
    /// Skipping it silently would silently under-restrict, so the
    /// offending pattern is named instead.
    #[error("invalid tool pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
