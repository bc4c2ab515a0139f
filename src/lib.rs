//! Proof-of-work ledger replicated by longest-chain consensus.
//!
//! The core (`blockchain`, `consensus`) is transport-free; `api` and
//! `network` wrap it in a small HTTP node.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod consensus;
pub mod error;
pub mod network;
pub mod transaction;

pub use blockchain::{Block, CancelToken, Ledger, ProofOfWork};
pub use consensus::{PeerChainView, resolve};
pub use error::{LedgerError, NodeError};
pub use transaction::Transaction;
