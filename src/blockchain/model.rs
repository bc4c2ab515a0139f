use chrono::Utc;
use log::info;
use serde_json::Number;

use super::{Block, ProofOfWork, validator};
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next seal.
///
/// Not internally synchronised: owners share it behind a single lock so
/// sealing and chain replacement never interleave.
#[derive(Debug, Clone)]
pub struct Ledger {
    identifier: String,
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    pow: ProofOfWork,
}

impl Ledger {
    /// Create a ledger holding only the genesis block.
    pub fn new(identifier: impl Into<String>, pow: ProofOfWork) -> Self {
        Self {
            identifier: identifier.into(),
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            pow,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn proof_of_work(&self) -> &ProofOfWork {
        &self.pow
    }

    /// Queue a transaction; returns the index of the block it will land in.
    pub fn record_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.chain.len() as u64 + 1
    }

    /// Seal the pending pool into a new block stamped with the current time.
    pub fn seal_block(
        &mut self,
        proof: u64,
        previous_hash: Option<String>,
        origin: Option<String>,
    ) -> Result<Block, LedgerError> {
        self.seal_block_at(proof, previous_hash, origin, now_timestamp())
    }

    /// Seal with an explicit timestamp, stored unchanged even when it
    /// precedes the last block's.
    pub fn seal_block_at(
        &mut self,
        proof: u64,
        previous_hash: Option<String>,
        origin: Option<String>,
        timestamp: f64,
    ) -> Result<Block, LedgerError> {
        let last = self.last_block()?;
        let previous_hash = previous_hash.unwrap_or_else(|| last.compute_hash());
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp,
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
            node_identifier: origin,
        };
        info!(
            "SEALED block#{} txs={} proof={} by {}",
            block.index,
            block.transactions.len(),
            block.proof,
            block.node_identifier.as_deref().unwrap_or("-")
        );
        self.chain.push(block.clone());
        Ok(block)
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Owned copy of the chain, e.g. for serving to peers.
    pub fn snapshot(&self) -> Vec<Block> {
        self.chain.clone()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Validate this ledger's own chain.
    pub fn is_valid(&self) -> bool {
        validator::is_valid_chain(&self.chain, &self.pow)
    }

    /// Swap the whole chain. The pending pool is left untouched.
    pub(crate) fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

/// Current UTC time as fractional seconds since the epoch.
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
