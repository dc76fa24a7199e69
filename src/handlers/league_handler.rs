use actix_web::{web, HttpResponse, Result};
use chrono::Utc;

use crate::db::game_queries::window_start;
use crate::db::LeagueStore;
use crate::league::{LeagueError, StandingsService};
use crate::models::common::ApiResponse;
use crate::models::game::{GameRecord, GamesResponse};
use crate::models::standing::StandingsResponse;

/// GET /games - games from the last two months, newest first
#[tracing::instrument(name = "List recent games", skip(store))]
pub async fn list_recent_games(store: web::Data<LeagueStore>) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();

    let rows = store.fetch_games(today).await.map_err(|e| {
        tracing::error!("Failed to fetch games: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to fetch games")
    })?;

    let games = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index))
        .collect::<Result<Vec<GameRecord>, _>>();

    match games {
        Ok(games) => Ok(HttpResponse::Ok().json(GamesResponse {
            games,
            from: window_start(today),
            to: today,
        })),
        Err(e) => {
            tracing::error!("Stored game data is malformed: {}", e);
            Ok(HttpResponse::InternalServerError().json(
                ApiResponse::<GamesResponse>::error("Failed to read games")
            ))
        }
    }
}

/// GET /standings - standings computed from every stored game
#[tracing::instrument(name = "Get standings", skip(store))]
pub async fn get_standings(store: web::Data<LeagueStore>) -> Result<HttpResponse> {
    let service = StandingsService::new(store.get_ref().clone());

    match service.current_standings().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(LeagueError::Standings(e)) => {
            tracing::error!("Standings unavailable due to malformed data: {}", e);
            Ok(HttpResponse::InternalServerError().json(
                ApiResponse::<StandingsResponse>::error("Standings are temporarily unavailable")
            ))
        }
        Err(LeagueError::Store(e)) => {
            tracing::error!("Failed to load games for standings: {}", e);
            Ok(HttpResponse::InternalServerError().json(
                ApiResponse::<StandingsResponse>::error("Database error")
            ))
        }
    }
}
