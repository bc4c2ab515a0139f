use std::collections::BTreeSet;

use reqwest::Url;

use crate::error::NodeError;

/// Known peer addresses, stored as `host:port`.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    nodes: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, e.g. `http://192.168.0.5:5000` or `192.168.0.5:5000`.
    /// Returns the normalised address.
    pub fn register(&mut self, address: &str) -> Result<String, NodeError> {
        let node = parse_node_address(address)?;
        self.nodes.insert(node.clone());
        Ok(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reduce an address to its `host[:port]` part.
pub fn parse_node_address(address: &str) -> Result<String, NodeError> {
    let trimmed = address.trim();
    let invalid = || NodeError::InvalidUrl(address.to_string());
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return Err(invalid());
    }

    if trimmed.contains("://") {
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        return Ok(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
