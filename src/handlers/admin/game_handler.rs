use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::db::{LeagueStore, StoreError};
use crate::league::GameValidator;
use crate::models::common::ApiResponse;
use crate::models::game::{GameRecord, GameSubmission};

/// POST /admin/games - register a game result
#[tracing::instrument(
    name = "Submit game result",
    skip(store, body),
    fields(date = %body.date)
)]
pub async fn submit_game(
    store: web::Data<LeagueStore>,
    body: web::Json<GameSubmission>,
) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();

    let game = match GameValidator::new().validate(&body, today) {
        Ok(game) => game,
        Err(e) => {
            warn!("Rejected game submission: {}", e);
            return Ok(HttpResponse::BadRequest().json(
                ApiResponse::<GameRecord>::error_with_message("Game rejected", e.to_string())
            ));
        }
    };

    match store.insert_game(&game).await {
        Ok(()) => {
            info!("Game registered for {}", game.iso_date());
            Ok(HttpResponse::Created().json(ApiResponse::success("Game registered", GameRecord::from(game))))
        }
        Err(e @ StoreError::UnknownTeam { .. }) => {
            warn!("Game submission references unknown team: {}", e);
            Ok(HttpResponse::BadRequest().json(
                ApiResponse::<GameRecord>::error_with_message("Game rejected", e.to_string())
            ))
        }
        Err(e) => {
            error!("Error inserting game: {}", e);
            Ok(HttpResponse::InternalServerError().json(
                ApiResponse::<GameRecord>::error("Error inserting game")
            ))
        }
    }
}
