use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Queue a transaction for the next block. Amounts and parties are not checked.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    req: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.record_transaction(req.sender, req.recipient, req.amount)
    };
    debug!("queued transaction for block#{index}");
    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// List transactions waiting for the next seal.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}
