use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

use bounty_board::config::AppConfig;
use bounty_board::league::orchestration::LedgerService;
use bounty_board::league::LeagueState;
use bounty_board::{build_store, configure_routes, init_tracing, load_dotenv};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    info!("Starting bounty board server...");

    let store = build_store(&config.storage).await.map_err(|e| {
        error!(error = ?e, "Failed to open ledger store");
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let bind = (config.bind_address.clone(), config.port);
    let frontend_origin = config.cors_allowed_origin.clone();
    let state = web::Data::new(LeagueState::new(LedgerService::new(store), config));

    info!("Listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
