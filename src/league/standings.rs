use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

use crate::db::LeagueStore;
use crate::league::LeagueError;
use crate::models::game::{GameRecord, GameRow};
use crate::models::standing::{StandingsResponse, TeamStanding};

/// Stored game data that cannot be aggregated
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandingsError {
    #[error("Malformed game record at position {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl StandingsError {
    fn malformed(index: usize, reason: impl Into<String>) -> Self {
        StandingsError::MalformedRecord { index, reason: reason.into() }
    }
}

impl GameRow {
    /// Convert a stored row into a game record, rejecting rows with missing
    /// or nonsensical columns.
    pub fn into_record(self, index: usize) -> Result<GameRecord, StandingsError> {
        let date = self.date
            .ok_or_else(|| StandingsError::malformed(index, "missing date"))?;
        let home_team_name = self.home_team_name
            .ok_or_else(|| StandingsError::malformed(index, "missing home team"))?;
        let away_team_name = self.away_team_name
            .ok_or_else(|| StandingsError::malformed(index, "missing away team"))?;
        let home_score = self.home_score
            .ok_or_else(|| StandingsError::malformed(index, "missing home score"))?;
        let away_score = self.away_score
            .ok_or_else(|| StandingsError::malformed(index, "missing away score"))?;

        Ok(GameRecord {
            date,
            home_team_name,
            away_team_name,
            home_score,
            away_score,
        })
    }
}

/// Accumulates standings keyed by exact team name, remembering the order in
/// which teams were first seen.
#[derive(Debug, Default)]
struct StandingsTable {
    index: HashMap<String, usize>,
    rows: Vec<TeamStanding>,
}

impl StandingsTable {
    fn entry(&mut self, name: &str) -> &mut TeamStanding {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.rows.push(TeamStanding::new(name));
                self.index.insert(name.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[slot]
    }

    fn record(&mut self, game: &GameRecord) {
        // Both entries exist even when one side has nothing to record yet
        self.entry(&game.home_team_name);
        self.entry(&game.away_team_name);

        match game.home_score.cmp(&game.away_score) {
            Ordering::Greater => {
                self.entry(&game.home_team_name).record_win();
                self.entry(&game.away_team_name).record_loss();
            }
            Ordering::Less => {
                self.entry(&game.away_team_name).record_win();
                self.entry(&game.home_team_name).record_loss();
            }
            Ordering::Equal => {
                self.entry(&game.home_team_name).record_draw();
                self.entry(&game.away_team_name).record_draw();
            }
        }
    }

    fn into_ranked(mut self) -> Vec<TeamStanding> {
        // sort_by is stable, so teams level on points and wins keep first-seen order
        self.rows.sort_by(|a, b| {
            b.points.cmp(&a.points).then_with(|| b.wins.cmp(&a.wins))
        });
        self.rows
    }
}

fn check_record(index: usize, game: &GameRecord) -> Result<(), StandingsError> {
    if game.home_team_name.is_empty() {
        return Err(StandingsError::malformed(index, "empty home team name"));
    }
    if game.away_team_name.is_empty() {
        return Err(StandingsError::malformed(index, "empty away team name"));
    }
    if game.home_team_name == game.away_team_name {
        return Err(StandingsError::malformed(index, format!("{} listed as both home and away", game.home_team_name)));
    }
    if game.home_score < 0 {
        return Err(StandingsError::malformed(index, format!("negative home score {}", game.home_score)));
    }
    if game.away_score < 0 {
        return Err(StandingsError::malformed(index, format!("negative away score {}", game.away_score)));
    }
    Ok(())
}

/// Build the ranked standings table from a set of games.
///
/// Teams are ordered by points, then wins. Any malformed record fails the
/// whole computation; a partial table is never returned.
pub fn compute_standings(games: &[GameRecord]) -> Result<Vec<TeamStanding>, StandingsError> {
    let mut table = StandingsTable::default();

    for (index, game) in games.iter().enumerate() {
        check_record(index, game)?;
        table.record(game);
    }

    Ok(table.into_ranked())
}

/// Convert raw stored rows and compute standings from them
pub fn compute_standings_from_rows(rows: Vec<GameRow>) -> Result<Vec<TeamStanding>, StandingsError> {
    let games = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index))
        .collect::<Result<Vec<_>, _>>()?;

    compute_standings(&games)
}

/// Service responsible for producing league standings from stored games
#[derive(Debug, Clone)]
pub struct StandingsService {
    store: LeagueStore,
}

impl StandingsService {
    pub fn new(store: LeagueStore) -> Self {
        Self { store }
    }

    /// Standings over the complete game history
    pub async fn current_standings(&self) -> Result<StandingsResponse, LeagueError> {
        let rows = self.store.fetch_all_games().await?;
        let games_counted = rows.len();

        let standings = compute_standings_from_rows(rows).map_err(|e| {
            tracing::error!("Refusing to build standings from stored games: {}", e);
            e
        })?;

        tracing::info!("Computed standings for {} teams from {} games", standings.len(), games_counted);

        Ok(StandingsResponse {
            standings,
            games_counted,
        })
    }
}
