use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use rand::Rng;

use super::{DEFAULT_HARDNESS, hasher::sha256_hex};

/// Upper bound of a single random probe step.
const MAX_PROBE_STEP: u64 = 1 << 32;

/// How many probes run between two cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 256;

/// Shared abort signal for a running proof search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also fires once `timeout` has elapsed.
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Proof-of-work puzzle: `sha256(last_proof ‖ proof ‖ last_hash)` must
/// start with `hardness` hex zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    hardness: usize,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_HARDNESS)
    }
}

impl ProofOfWork {
    pub fn new(hardness: usize) -> Self {
        Self { hardness }
    }

    pub fn hardness(&self) -> usize {
        self.hardness
    }

    /// Check a candidate proof against the previous block's proof and hash.
    pub fn valid(&self, last_proof: u64, proof: u64, last_hash: &str) -> bool {
        let guess = format!("{last_proof}{proof}{last_hash}");
        meets_hardness(&sha256_hex(guess.as_bytes()), self.hardness)
    }

    /// Probe randomly increasing candidates until one is valid.
    ///
    /// Returns `None` if `cancel` fires first. With a seeded `rng` the
    /// result is reproducible.
    pub fn search<R: Rng>(
        &self,
        last_proof: u64,
        last_hash: &str,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Option<u64> {
        let mut proof = rng.gen_range(0..=MAX_PROBE_STEP);
        let mut attempts: u64 = 0;
        while !self.valid(last_proof, proof, last_hash) {
            attempts += 1;
            if attempts % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
                debug!("proof search abandoned after {attempts} probes");
                return None;
            }
            proof = proof.wrapping_add(rng.gen_range(0..=MAX_PROBE_STEP));
        }
        debug!("proof {proof} found after {attempts} probes (hardness={})", self.hardness);
        Some(proof)
    }
}

/// True when `digest` begins with `hardness` ASCII zeros.
pub fn meets_hardness(digest: &str, hardness: usize) -> bool {
    digest.len() >= hardness && digest.bytes().take(hardness).all(|c| c == b'0')
}
