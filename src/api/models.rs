use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::blockchain::{Block, CancelToken, Ledger, ProofOfWork};
use crate::config::Settings;
use crate::error::NodeError;
use crate::network::{NodeRegistry, PeerClient};
use crate::transaction::Transaction;

/// Shared node state: the ledger behind one lock, known peers and the
/// cancel tokens of in-flight proof searches.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub nodes: Mutex<NodeRegistry>,
    pub miners: Mutex<HashMap<Uuid, CancelToken>>,
    pub peer_client: PeerClient,
    pub mine_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self, NodeError> {
        let mut nodes = NodeRegistry::new();
        for peer in &settings.peers {
            if let Err(e) = nodes.register(peer) {
                warn!("ignoring configured peer: {e}");
            }
        }
        Ok(Self {
            ledger: Mutex::new(Ledger::new(
                settings.node_id.clone(),
                ProofOfWork::new(settings.hardness),
            )),
            nodes: Mutex::new(nodes),
            miners: Mutex::new(HashMap::new()),
            peer_client: PeerClient::new(settings.peer_timeout)?,
            mine_timeout: settings.mine_timeout,
        })
    }

    /// Register a new search. It is unregistered when the session drops.
    pub fn start_mining(&self) -> MiningSession<'_> {
        let token = match self.mine_timeout {
            Some(timeout) => CancelToken::with_deadline(timeout),
            None => CancelToken::new(),
        };
        let id = Uuid::new_v4();
        self.miners
            .lock()
            .expect("mutex poisoned")
            .insert(id, token.clone());
        MiningSession {
            state: self,
            id,
            token,
        }
    }

    /// Abort every running search, e.g. after the chain was replaced.
    pub fn cancel_mining(&self) -> usize {
        let mut miners = self.miners.lock().expect("mutex poisoned");
        for token in miners.values() {
            token.cancel();
        }
        let n = miners.len();
        miners.clear();
        n
    }
}

/// A registered proof search; removes itself from `AppState::miners` on drop,
/// including when the handler future is dropped mid-search.
pub struct MiningSession<'a> {
    state: &'a AppState,
    id: Uuid,
    token: CancelToken,
}

impl MiningSession<'_> {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for MiningSession<'_> {
    fn drop(&mut self) {
        if let Ok(mut miners) = self.state.miners.lock() {
            miners.remove(&self.id);
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub node_identifier: &'a str,
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub replaced: bool,
    pub length: usize,
    pub chain: Vec<Block>,
}
