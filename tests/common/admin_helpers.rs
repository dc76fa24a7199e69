use chrono::Utc;
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use league_results_backend::auth::jwt::generate_token;
use league_results_backend::config::settings::{get_config, get_jwt_settings};
use league_results_backend::models::user::User;

use crate::common::utils::TestApp;

/// Log in as the seeded admin and return the bearer token
pub async fn login_as_admin(app: &TestApp) -> String {
    let client = Client::new();

    let login_response = client
        .post(&format!("{}/login", app.address))
        .json(&json!({
            "username": app.admin_username,
            "password": app.admin_password
        }))
        .send()
        .await
        .expect("Failed to login");

    assert_eq!(200, login_response.status().as_u16());

    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse login response");

    login_body["token"].as_str().expect("No token in response").to_string()
}

/// Sign a token directly with the configured secret, bypassing the database
pub fn token_for(admin: bool) -> String {
    let configuration = get_config().expect("Failed to read configuration.");
    let jwt_settings = get_jwt_settings(&configuration);
    let user = User {
        id: Uuid::new_v4(),
        username: format!("user{}", Uuid::new_v4()),
        name: "Test User".to_string(),
        password_hash: String::new(),
        admin,
        created_at: Utc::now(),
    };
    generate_token(&user, &jwt_settings).expect("Failed to sign token")
}

pub async fn create_team(app: &TestApp, token: &str, name: &str) -> serde_json::Value {
    let response = Client::new()
        .post(&format!("{}/admin/teams", app.address))
        .bearer_auth(token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create team");

    assert_eq!(201, response.status().as_u16());
    response.json().await.expect("Failed to parse team response")
}

pub async fn submit_game(
    app: &TestApp,
    token: &str,
    date: &str,
    home: (&str, &str),
    away: (&str, &str),
) -> reqwest::Response {
    Client::new()
        .post(&format!("{}/admin/games", app.address))
        .bearer_auth(token)
        .json(&json!({
            "date": date,
            "home_team_name": home.0,
            "home_score": home.1,
            "away_team_name": away.0,
            "away_score": away.1
        }))
        .send()
        .await
        .expect("Failed to submit game")
}
