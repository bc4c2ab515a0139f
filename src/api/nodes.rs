use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::consensus::{PeerChainView, resolve};
use crate::network::registry::parse_node_address;

/// Register peer nodes. Rejects the whole batch if any address is invalid.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    req: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if req.nodes.is_empty() {
        return HttpResponse::BadRequest().body("Please supply a valid list of nodes");
    }
    if let Some(err) = req.nodes.iter().find_map(|n| parse_node_address(n).err()) {
        return HttpResponse::BadRequest().body(err.to_string());
    }

    let mut nodes = state.nodes.lock().expect("mutex poisoned");
    for node in &req.nodes {
        if let Err(e) = nodes.register(node) {
            return HttpResponse::BadRequest().body(e.to_string());
        }
    }
    info!("registered {} node(s), {} known", req.nodes.len(), nodes.len());
    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes: nodes.nodes().map(String::from).collect(),
    })
}

/// Gather every peer's chain plus our own and run fork choice.
#[post("/nodes/resolve/")]
pub async fn resolve_nodes(state: web::Data<AppState>) -> impl Responder {
    let peers: Vec<String> = {
        let nodes = state.nodes.lock().expect("mutex poisoned");
        nodes.nodes().map(String::from).collect()
    };
    let views = state
        .peer_client
        .fetch_all(peers.iter().map(String::as_str))
        .await;

    adopt_peer_views(&state, views)
}

/// Run fork choice over fetched views plus the local one, under the ledger lock.
pub(super) fn adopt_peer_views(state: &AppState, mut views: Vec<PeerChainView>) -> HttpResponse {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    views.push(PeerChainView::new(ledger.identifier(), ledger.snapshot()));
    match resolve(&mut ledger, &views) {
        Ok(replaced) => {
            if replaced {
                let cancelled = state.cancel_mining();
                if cancelled > 0 {
                    info!("cancelled {cancelled} running search(es) after chain replacement");
                }
            }
            HttpResponse::Ok().json(ResolveResponse {
                replaced,
                length: ledger.len(),
                chain: ledger.snapshot(),
            })
        }
        Err(e) => {
            warn!("consensus aborted: {e}");
            HttpResponse::BadGateway().body(e.to_string())
        }
    }
}
