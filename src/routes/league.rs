use actix_web::{get, web, HttpResponse, Result};

use crate::db::LeagueStore;
use crate::handlers::league_handler::{get_standings, list_recent_games};

#[get("/games")]
pub async fn recent_games(store: web::Data<LeagueStore>) -> Result<HttpResponse> {
    list_recent_games(store).await
}

#[get("/standings")]
pub async fn standings(store: web::Data<LeagueStore>) -> Result<HttpResponse> {
    get_standings(store).await
}
