use chrono::{Months, NaiveDate};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use crate::league::validation::MAX_GAME_AGE_MONTHS;
use crate::models::game::{GameRow, ValidatedGame};
use crate::models::team::Team;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Unknown team(s): {home} vs {away}")]
    UnknownTeam { home: String, away: String },

    #[error("Team {0} already exists")]
    DuplicateTeam(String),
}

/// Data-access handle for teams, games and users.
///
/// Constructed once at startup and shared with every worker; call
/// [`LeagueStore::close`] on shutdown.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    pool: PgPool,
}

impl LeagueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }

    /// Games in the rolling window ending at `today`, newest first
    pub async fn fetch_games(&self, today: NaiveDate) -> Result<Vec<GameRow>, StoreError> {
        let from = window_start(today);
        debug!("Fetching games between {} and {}", from, today);

        let rows = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT
                g.date,
                home_team.name AS home_team_name,
                g.home_score,
                away_team.name AS away_team_name,
                g.away_score
            FROM games g
            LEFT JOIN teams AS home_team ON home_team.id = g.home
            LEFT JOIN teams AS away_team ON away_team.id = g.away
            WHERE g.date <= $1 AND g.date >= $2
            ORDER BY g.date DESC, g.id DESC
            "#,
        )
        .bind(today)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every stored game, in insertion order
    pub async fn fetch_all_games(&self) -> Result<Vec<GameRow>, StoreError> {
        let rows = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT
                g.date,
                home_team.name AS home_team_name,
                g.home_score,
                away_team.name AS away_team_name,
                g.away_score
            FROM games g
            LEFT JOIN teams AS home_team ON home_team.id = g.home
            LEFT JOIN teams AS away_team ON away_team.id = g.away
            ORDER BY g.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn fetch_teams(&self) -> Result<Vec<Team>, StoreError> {
        let teams = sqlx::query_as::<_, Team>("SELECT id, name FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(teams)
    }

    /// Store a validated game, resolving both team names to their ids
    pub async fn insert_game(&self, game: &ValidatedGame) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO games (date, home, away, home_score, away_score)
            SELECT $1, home_team.id, away_team.id, $4, $5
            FROM teams AS home_team, teams AS away_team
            WHERE home_team.name = $2 AND away_team.name = $3
            "#,
        )
        .bind(game.date)
        .bind(&game.home_team_name)
        .bind(&game.away_team_name)
        .bind(game.home_score)
        .bind(game.away_score)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UnknownTeam {
                home: game.home_team_name.clone(),
                away: game.away_team_name.clone(),
            });
        }

        info!(
            "Stored game on {}: {} {} - {} {}",
            game.iso_date(), game.home_team_name, game.home_score, game.away_score, game.away_team_name
        );
        Ok(())
    }

    pub async fn insert_team(&self, name: &str) -> Result<Team, StoreError> {
        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::DuplicateTeam(name.to_string())
            }
            other => StoreError::Database(other),
        })?;

        Ok(team)
    }
}

/// First day of the rolling games window ending at `today`
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(MAX_GAME_AGE_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}
