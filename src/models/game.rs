// src/models/game.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw game submission as it arrives from the admin form.
/// Every field is untrusted text until it has been through the validator.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GameSubmission {
    pub date: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: String,
    pub away_score: String,
}

/// A submission that passed validation and is ready to be stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ValidatedGame {
    pub date: NaiveDate,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: i32,
    pub away_score: i32,
}

impl ValidatedGame {
    /// ISO-8601 calendar date, e.g. `2024-05-17`
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// One completed match between two named teams.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: i32,
    pub away_score: i32,
}

impl From<ValidatedGame> for GameRecord {
    fn from(game: ValidatedGame) -> Self {
        Self {
            date: game.date,
            home_team_name: game.home_team_name,
            away_team_name: game.away_team_name,
            home_score: game.home_score,
            away_score: game.away_score,
        }
    }
}

/// Game row as read back from the database.
///
/// Team names come from a LEFT JOIN, so any column may be NULL when the
/// stored data is inconsistent.
#[derive(Debug, FromRow, Clone, Default)]
pub struct GameRow {
    pub date: Option<NaiveDate>,
    pub home_team_name: Option<String>,
    pub home_score: Option<i32>,
    pub away_team_name: Option<String>,
    pub away_score: Option<i32>,
}

/// Response for the public games listing
#[derive(Debug, Serialize, Deserialize)]
pub struct GamesResponse {
    pub games: Vec<GameRecord>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}
