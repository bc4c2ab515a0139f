use serde::{Deserialize, Serialize};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, GENESIS_TIMESTAMP, hasher};
use crate::transaction::Transaction;

/// A sealed block committing a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since epoch (UTC), fractional
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
    #[serde(default, alias = "origin_identifier")]
    pub node_identifier: Option<String>,
}

impl Block {
    /// The fixed first block shared by every replica.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: GENESIS_TIMESTAMP,
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            node_identifier: None,
        }
    }

    /// Digest of this block's canonical form.
    pub fn compute_hash(&self) -> String {
        hasher::digest(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_is_a_fixed_literal() {
        let g = Block::genesis();
        assert_eq!(g.index, 1);
        assert_eq!(g.proof, 100);
        assert_eq!(g.previous_hash, "1");
        assert!(g.transactions.is_empty());
        assert_eq!(g.compute_hash(), Block::genesis().compute_hash());
    }

    #[test]
    fn wire_round_trip_keeps_digest() {
        let b = Block {
            index: 3,
            timestamp: 1_712_345_678.123456,
            transactions: vec![
                Transaction::new("A", "B", 10),
                Transaction::new("B", "C", 5),
            ],
            proof: 4_294_967_311,
            previous_hash: "00".repeat(32),
            node_identifier: Some("node2".into()),
        };
        let wire = serde_json::to_string(&b).unwrap();
        let back: Block = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.compute_hash(), b.compute_hash());
    }

    #[test]
    fn origin_identifier_is_accepted_on_input() {
        let raw = r#"{"index":1,"timestamp":0.0,"transactions":[],"proof":100,
                      "previous_hash":"1","origin_identifier":"peer"}"#;
        let b: Block = serde_json::from_str(raw).unwrap();
        assert_eq!(b.node_identifier.as_deref(), Some("peer"));
    }

    #[test]
    fn missing_origin_parses_as_none() {
        let raw = r#"{"index":1,"timestamp":0.0,"transactions":[],"proof":100,"previous_hash":"1"}"#;
        let b: Block = serde_json::from_str(raw).unwrap();
        assert_eq!(b.node_identifier, None);
        assert_eq!(b.compute_hash(), Block::genesis().compute_hash());
    }

    #[test]
    fn tampering_changes_hash() {
        let mut b = Block::genesis();
        let old_hash = b.compute_hash();
        b.transactions.push(Transaction::new("x", "y", 1));
        assert_ne!(old_hash, b.compute_hash());
    }
}
