use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Ledger, is_valid_chain};
use crate::error::LedgerError;

/// A peer's chain as received over the wire. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerChainView {
    #[serde(alias = "node_identifier")]
    pub source_identifier: String,
    pub chain: Vec<Block>,
}

impl PeerChainView {
    pub fn new(source_identifier: impl Into<String>, chain: Vec<Block>) -> Self {
        Self {
            source_identifier: source_identifier.into(),
            chain,
        }
    }

    fn last_timestamp(&self) -> f64 {
        self.chain.last().map_or(f64::INFINITY, |b| b.timestamp)
    }
}

/// Longest-chain fork choice. Returns `true` when the local chain was replaced.
///
/// If every peer reports the same length, the view whose last block is
/// oldest wins and is adopted without validation. Otherwise only valid
/// chains longer than the local one are considered and the longest wins.
pub fn resolve(ledger: &mut Ledger, peers: &[PeerChainView]) -> Result<bool, LedgerError> {
    if let Some(bad) = peers.iter().find(|p| p.chain.is_empty()) {
        return Err(LedgerError::InvalidPeerView {
            source_identifier: bad.source_identifier.clone(),
        });
    }

    let lengths: HashSet<usize> = peers.iter().map(|p| p.chain.len()).collect();
    let candidate = if lengths.len() == 1 {
        earliest_finisher(peers)
    } else {
        longest_valid(ledger, peers)
    };

    match candidate {
        Some(view) if view.source_identifier != ledger.identifier() => {
            info!(
                "REPLACED chain with {} blocks from {} (was {})",
                view.chain.len(),
                view.source_identifier,
                ledger.len()
            );
            ledger.replace_chain(view.chain.clone());
            Ok(true)
        }
        Some(_) => {
            debug!("local chain already preferred");
            Ok(false)
        }
        None => Ok(false),
    }
}

// The equal-length pick is not validated. Kept as-is: callers may rely on
// whoever propagated first winning even before its chain is checked.
fn earliest_finisher(peers: &[PeerChainView]) -> Option<&PeerChainView> {
    let mut best: Option<&PeerChainView> = None;
    for view in peers {
        if best.is_none_or(|b| view.last_timestamp() < b.last_timestamp()) {
            best = Some(view);
        }
    }
    best
}

fn longest_valid<'a>(ledger: &Ledger, peers: &'a [PeerChainView]) -> Option<&'a PeerChainView> {
    let pow = ledger.proof_of_work();
    let mut max_length = ledger.len();
    let mut best = None;
    for view in peers {
        let length = view.chain.len();
        if length <= max_length {
            continue;
        }
        if !is_valid_chain(&view.chain, pow) {
            debug!(
                "rejected invalid chain of {} blocks from {}",
                length, view.source_identifier
            );
            continue;
        }
        max_length = length;
        best = Some(view);
    }
    best
}
