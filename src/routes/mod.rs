use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod league;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(auth::login)
        .service(league::recent_games)
        .service(league::standings);

    admin::init_admin_routes(cfg);
}
