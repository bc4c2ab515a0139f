use std::env;
use std::time::Duration;

use crate::blockchain::DEFAULT_HARDNESS;

/// Node settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub node_id: String,
    pub hardness: usize,
    pub peer_timeout: Duration,
    pub mine_timeout: Option<Duration>,
    pub peers: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Self {
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = get("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080);
        let node_id = get("NODE_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        let hardness = get("POW_HARDNESS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HARDNESS);
        let peer_timeout = get("PEER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));
        let mine_timeout = get("MINE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);
        let peers = get("PEERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            node_id,
            hardness,
            peer_timeout,
            mine_timeout,
            peers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use std::collections::HashMap;
    use std::time::Duration;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]);
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 8080);
        assert_eq!(s.hardness, 4);
        assert_eq!(s.node_id.len(), 32);
        assert_eq!(s.peer_timeout, Duration::from_secs(5));
        assert!(s.mine_timeout.is_none());
        assert!(s.peers.is_empty());
    }

    #[test]
    fn values_are_parsed() {
        let s = settings(&[
            ("PORT", "5001"),
            ("NODE_ID", "node1"),
            ("POW_HARDNESS", "2"),
            ("MINE_TIMEOUT_SECS", "30"),
            ("PEERS", "127.0.0.1:5002, http://127.0.0.1:5003,"),
        ]);
        assert_eq!(s.port, 5001);
        assert_eq!(s.node_id, "node1");
        assert_eq!(s.hardness, 2);
        assert_eq!(s.mine_timeout, Some(Duration::from_secs(30)));
        assert_eq!(s.peers, vec!["127.0.0.1:5002", "http://127.0.0.1:5003"]);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let s = settings(&[("PORT", "http"), ("POW_HARDNESS", "-1")]);
        assert_eq!(s.port, 8080);
        assert_eq!(s.hardness, 4);
    }
}
