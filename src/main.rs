use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use pow_ledger::api::{self, AppState};
use pow_ledger::config::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let state = AppState::new(&settings).map_err(std::io::Error::other)?;

    println!(
        "⛓️ Starting ledger node {} at http://{}:{} (hardness {})",
        settings.node_id, settings.host, settings.port, settings.hardness
    );
    info!(
        "{} peer(s) configured",
        state.nodes.lock().map(|n| n.len()).unwrap_or(0)
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
