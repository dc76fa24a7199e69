// src/routes/auth.rs
use actix_web::{post, web, HttpResponse};

use crate::config::jwt::JwtSettings;
use crate::db::LeagueStore;
use crate::handlers::auth_handler::login_user;
use crate::models::auth::LoginRequest;

#[post("/login")]
pub async fn login(
    login_form: web::Json<LoginRequest>,
    store: web::Data<LeagueStore>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    login_user(login_form, store, jwt_settings).await
}
