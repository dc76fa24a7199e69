use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::db::{LeagueStore, StoreError};
use crate::league::validation::Side;
use crate::league::GameValidator;
use crate::models::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::team::Team;
use crate::models::user::UserInfo;

#[derive(Serialize, Deserialize)]
pub struct AdminOverview {
    pub user: Option<UserInfo>,
    pub teams: Vec<Team>,
}

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

// GET /admin - signed in user plus the teams available to the game form
pub async fn get_admin_overview(
    req: HttpRequest,
    store: web::Data<LeagueStore>,
) -> Result<HttpResponse> {
    let user_id = req.extensions().get::<Claims>().and_then(Claims::user_id);

    let user = match user_id {
        Some(user_id) => store.find_user_by_id(user_id).await.map_err(|e| {
            error!("Database error getting user: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?,
        None => None,
    };

    let teams = store.fetch_teams().await.map_err(|e| {
        error!("Database error getting teams: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(AdminOverview {
        user: user.map(UserInfo::from),
        teams,
    }))
}

// GET /admin/teams
pub async fn get_teams(store: web::Data<LeagueStore>) -> Result<HttpResponse> {
    let teams = store.fetch_teams().await.map_err(|e| {
        error!("Database error getting teams: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(teams))
}

// POST /admin/teams
pub async fn create_team(
    store: web::Data<LeagueStore>,
    body: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse> {
    // Team names go through the same sanitizer as submitted games so they match on insert
    let name = match GameValidator::new().validate_team_name(&body.name, Side::Home) {
        Ok(name) => name,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(
                ApiResponse::<Team>::error("Team name cannot be empty")
            ));
        }
    };

    match store.insert_team(&name).await {
        Ok(team) => {
            info!("Created team {} ({})", team.name, team.id);
            Ok(HttpResponse::Created().json(ApiResponse::success("Team created", team)))
        }
        Err(StoreError::DuplicateTeam(name)) => {
            info!("Rejected duplicate team {}", name);
            Ok(HttpResponse::Conflict().json(
                ApiResponse::<Team>::error(format!("Team {} already exists", name))
            ))
        }
        Err(e) => {
            error!("Database error creating team: {}", e);
            Ok(HttpResponse::InternalServerError().json(
                ApiResponse::<Team>::error("Failed to create team")
            ))
        }
    }
}
