use thiserror::Error;

/// Errors that can abort a wipe run.
///
/// Non-fatal conditions (a stop against an already-stopped server, malformed
/// exceptional-date lines, a failed alert publish) are logged where they occur
/// and never surface through this type.
#[derive(Error, Debug)]
pub enum WipeError {
    /// Pre-flight misconfiguration. Raised before any mutation happens.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The server-management executable exited in a way that cannot be
    /// downgraded to a warning.
    #[error("server {verb} failed with exit code {code:?}")]
    ExternalProcess {
        verb: &'static str,
        code: Option<i32>,
    },

    /// Internal invariant breach. Indicates a bug, not bad input.
    #[error("invariant violation: {0}")]
    Invariant(String),
}
