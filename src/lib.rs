pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod entity;
pub mod error;
pub mod league;
pub mod render;
pub mod store;
pub mod test_support;

pub use bootstrap::{build_store, connect_and_migrate, init_tracing, load_dotenv};

use actix_web::web;

use league::{
    board_page, delete_players, delete_players_form, export_ledger, export_poster, get_leaderboard,
    get_ledger, get_players, replace_ledger, submit_result, submit_result_form,
};

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(board_page)
        .service(submit_result_form)
        .service(delete_players_form)
        .service(export_ledger)
        .service(export_poster)
        .service(
            web::scope("/api")
                .service(get_leaderboard)
                .service(get_players)
                .service(submit_result)
                .service(delete_players)
                .service(get_ledger)
                .service(replace_ledger),
        );
}
