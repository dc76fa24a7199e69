use actix_web::web;

use crate::handlers::admin::{game_handler, team_handler};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(team_handler::get_admin_overview))
            )
            // Team management routes
            .service(
                web::resource("/teams")
                    .route(web::get().to(team_handler::get_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            // Game registration
            .service(
                web::resource("/games")
                    .route(web::post().to(game_handler::submit_game))
            )
    );
}
