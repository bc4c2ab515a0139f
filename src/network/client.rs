use std::time::Duration;

use futures_util::future::join_all;
use log::warn;
use reqwest::Client;

use crate::consensus::PeerChainView;
use crate::error::NodeError;

/// Path every node serves its chain on.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// Fetches peer chains over HTTP.
#[derive(Debug, Clone)]
pub struct PeerClient {
    http: Client,
}

impl PeerClient {
    pub fn new(timeout: Duration) -> Result<Self, NodeError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NodeError::Fetch {
                node: "-".into(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { http })
    }

    /// GET a single node's chain.
    pub async fn fetch_chain(&self, node: &str) -> Result<PeerChainView, NodeError> {
        let fetch_err = |reason: String| NodeError::Fetch {
            node: node.to_string(),
            reason,
        };
        let url = format!("http://{node}{CHAIN_PATH}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fetch_err(format!("status {}", response.status())));
        }
        response
            .json::<PeerChainView>()
            .await
            .map_err(|e| fetch_err(format!("malformed chain: {e}")))
    }

    /// Fetch every node concurrently, dropping the ones that fail.
    pub async fn fetch_all<'a>(&self, nodes: impl IntoIterator<Item = &'a str>) -> Vec<PeerChainView> {
        let results = join_all(nodes.into_iter().map(|n| self.fetch_chain(n))).await;
        results
            .into_iter()
            .filter_map(|r| r.map_err(|e| warn!("{e}")).ok())
            .collect()
    }
}
