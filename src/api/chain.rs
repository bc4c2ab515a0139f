use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Reward credited to the sealing node; sender "0" marks it as minted.
pub const MINING_REWARD: i64 = 1;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        node_identifier: ledger.identifier(),
        length: ledger.len(),
        chain: ledger.chain(),
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid(),
        length: ledger.len(),
    })
}

/// Mine a new block from the pending pool:
/// - snapshot the head and release the lock
/// - search for a proof on the blocking pool (cancellable)
/// - re-check the head, add the reward and seal
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let (last_proof, last_hash, pow, node_id) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        match ledger.last_block() {
            Ok(last) => (
                last.proof,
                last.compute_hash(),
                *ledger.proof_of_work(),
                ledger.identifier().to_string(),
            ),
            Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
        }
    };

    let session = state.start_mining();
    let token = session.token().clone();
    let search_hash = last_hash.clone();
    let found = web::block(move || {
        let mut rng = StdRng::from_entropy();
        pow.search(last_proof, &search_hash, &mut rng, &token)
    })
    .await;
    drop(session);

    let proof = match found {
        Ok(Some(proof)) => proof,
        Ok(None) => {
            warn!("mining abandoned on top of {last_hash}");
            return HttpResponse::Conflict().body("mining abandoned");
        }
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    seal_found_proof(&state, proof, last_hash, node_id)
}

/// Seal `proof` on top of `last_hash` unless the head moved meanwhile.
pub(super) fn seal_found_proof(
    state: &AppState,
    proof: u64,
    last_hash: String,
    node_id: String,
) -> HttpResponse {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    let head_moved = ledger
        .last_block()
        .map_or(true, |last| last.compute_hash() != last_hash);
    if head_moved {
        warn!("stale proof {proof}: head moved while mining");
        return HttpResponse::Conflict().body("head moved while mining");
    }

    ledger.record_transaction("0", node_id.clone(), MINING_REWARD);
    match ledger.seal_block(proof, Some(last_hash), Some(node_id)) {
        Ok(block) => {
            info!("MINED block#{} proof={}", block.index, block.proof);
            HttpResponse::Ok().json(MineResponse {
                message: "New Block Forged",
                index: block.index,
                transactions: block.transactions,
                proof: block.proof,
                previous_hash: block.previous_hash,
            })
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
