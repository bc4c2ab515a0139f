use thiserror::Error;

/// Failures raised by the ledger core.
///
/// Invalid chains and proofs are not errors: they come back as `false`
/// from the validators because callers branch on them routinely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("chain has no blocks")]
    EmptyChain,
    #[error("peer view from `{source_identifier}` carries an empty chain")]
    InvalidPeerView { source_identifier: String },
}

/// Failures raised by the node transport around the core.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid node address: {0}")]
    InvalidUrl(String),
    #[error("failed to fetch chain from {node}: {reason}")]
    Fetch { node: String, reason: String },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
