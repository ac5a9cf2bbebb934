//! League HTTP handlers and the domain modules behind them
//!
//! Pure logic lives in `rules`, `scoring`, `ledger` and `ranking`; the
//! load/mutate/save unit of work lives in `orchestration`.

pub mod ledger;
pub mod orchestration;
pub mod ranking;
pub mod rules;
pub mod scoring;

use actix_web::{get, post, put, web, HttpResponse};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::dto::leaderboard::{
    DeletePlayersResponse, LeaderboardResponse, LedgerResponse, SubmissionResponse,
};
use crate::dto::player_request::{DeletePlayersForm, DeletePlayersRequest, ReplaceLedgerRequest};
use crate::dto::result_request::{ResultForm, ResultRequest};
use crate::error::AppError;
use crate::render::export::ledger_csv;
use crate::render::html::{render_board, Banner, BoardPage};
use crate::render::poster::{render_poster, PosterTitle};
use orchestration::{LedgerService, ResultSubmission};

/// Shared application state handed to every handler
pub struct LeagueState {
    pub service: LedgerService,
    pub config: AppConfig,
}

impl LeagueState {
    pub fn new(service: LedgerService, config: AppConfig) -> Self {
        Self { service, config }
    }
}

async fn board_response(state: &LeagueState, banner: Option<Banner>) -> HttpResponse {
    let (leaderboard, names, banner) = match state.service.ledger().await {
        Ok(ledger) => (
            ranking::leaderboard(&ledger),
            ledger.player_names(),
            banner,
        ),
        Err(e) => {
            error!(error = %e, "Failed to load ledger for board");
            (Vec::new(), Vec::new(), Some(banner.unwrap_or_else(|| e.banner())))
        }
    };

    let html = render_board(&BoardPage {
        league_name: &state.config.league.name,
        month: state.config.league.current_month(),
        leaderboard: &leaderboard,
        player_names: &names,
        banner: banner.as_ref(),
    });
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html.into_string())
}

#[get("/")]
pub async fn board_page(state: web::Data<LeagueState>) -> HttpResponse {
    board_response(&state, None).await
}

#[post("/results")]
pub async fn submit_result_form(
    state: web::Data<LeagueState>,
    form: web::Form<ResultForm>,
) -> HttpResponse {
    let submission = ResultSubmission::from(form.into_inner());
    let banner = match state.service.submit(&submission).await {
        Ok(deltas) => Banner::success(format!("Saved! {} players updated", deltas.len())),
        Err(e) => {
            error!(error = %e, "Result submission failed");
            e.banner()
        }
    };
    board_response(&state, Some(banner)).await
}

#[post("/players/delete")]
pub async fn delete_players_form(
    state: web::Data<LeagueState>,
    form: web::Form<DeletePlayersForm>,
) -> HttpResponse {
    let banner = match state.service.delete_players(&form.names()).await {
        Ok(removed) => Banner::success(format!("Removed {removed} players")),
        Err(e) => {
            error!(error = %e, "Player deletion failed");
            e.banner()
        }
    };
    board_response(&state, Some(banner)).await
}

#[get("/export/ledger.csv")]
pub async fn export_ledger(state: web::Data<LeagueState>) -> Result<HttpResponse, AppError> {
    let standings = state.service.standings().await?;
    let body = ledger_csv(&standings)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"bounty_ledger.csv\"",
        ))
        .body(body))
}

#[get("/export/poster.png")]
pub async fn export_poster(state: web::Data<LeagueState>) -> Result<HttpResponse, AppError> {
    let leaderboard = state.service.leaderboard().await?;
    let month = state.config.league.current_month();
    let title = PosterTitle {
        league_name: &state.config.league.name,
        month,
    };

    let png = render_poster(&state.config.poster, title, &leaderboard).map_err(|e| {
        error!(error = %e, "Poster rendering failed");
        AppError::from(e)
    })?;
    info!(players = leaderboard.len(), bytes = png.len(), "Printed poster");

    Ok(HttpResponse::Ok()
        .content_type("image/png")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"wanted_list_{month}.png\""),
        ))
        .body(png))
}

#[get("/leaderboard")]
pub async fn get_leaderboard(state: web::Data<LeagueState>) -> Result<HttpResponse, AppError> {
    let ledger = state.service.ledger().await?;
    Ok(HttpResponse::Ok().json(LeaderboardResponse {
        total_players: ledger.len(),
        leaderboard: ranking::leaderboard(&ledger),
    }))
}

#[get("/players")]
pub async fn get_players(state: web::Data<LeagueState>) -> Result<HttpResponse, AppError> {
    let ledger = state.service.ledger().await?;
    Ok(HttpResponse::Ok().json(ledger.player_names()))
}

#[post("/results")]
pub async fn submit_result(
    state: web::Data<LeagueState>,
    request: web::Json<ResultRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = ResultSubmission::from(request.into_inner());
    let deltas = state.service.submit(&submission).await?;
    Ok(HttpResponse::Ok().json(SubmissionResponse {
        message: "Game result applied".to_string(),
        players_updated: deltas.len(),
        deltas,
    }))
}

#[post("/players/delete")]
pub async fn delete_players(
    state: web::Data<LeagueState>,
    request: web::Json<DeletePlayersRequest>,
) -> Result<HttpResponse, AppError> {
    let removed = state.service.delete_players(&request.names).await?;
    Ok(HttpResponse::Ok().json(DeletePlayersResponse { removed }))
}

#[get("/ledger")]
pub async fn get_ledger(state: web::Data<LeagueState>) -> Result<HttpResponse, AppError> {
    let ledger = state.service.ledger().await?;
    Ok(HttpResponse::Ok().json(LedgerResponse {
        players: ledger.into_records(),
    }))
}

#[put("/ledger")]
pub async fn replace_ledger(
    state: web::Data<LeagueState>,
    request: web::Json<ReplaceLedgerRequest>,
) -> Result<HttpResponse, AppError> {
    let ledger = state
        .service
        .replace(request.into_inner().players)
        .await?;
    Ok(HttpResponse::Ok().json(LedgerResponse {
        players: ledger.into_records(),
    }))
}
