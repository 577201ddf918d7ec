//! User-facing fault categories.

use serde::{Deserialize, Serialize};

/// The three categories every failure collapses to at the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The request was malformed or rejected before execution
    Client,
    /// The remote service failed while executing
    Server,
    /// Anything else (network drop, decoding error, bug)
    Unexpected,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Client => "client",
            FaultKind::Server => "server",
            FaultKind::Unexpected => "unexpected",
        }
    }

    /// Canonical message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            FaultKind::Client => "Oops something went wrong (client error)!",
            FaultKind::Server => "Oops something went wrong (server error)",
            FaultKind::Unexpected => "Oops something went wrong (unexpected error)!",
        }
    }
}
