pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use hasher::digest;
pub use model::Ledger;
pub use pow::{CancelToken, ProofOfWork};
pub use validator::is_valid_chain;

/// Default Proof-of-Work hardness (number of leading hex zeros).
pub const DEFAULT_HARDNESS: usize = 4;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel stored as the genesis block's previous hash.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Genesis timestamp; fixed so every replica shares one genesis digest.
pub const GENESIS_TIMESTAMP: f64 = 0.0;
