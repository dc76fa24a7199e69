// src/models/standing.rs
use serde::{Deserialize, Serialize};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// A team's aggregated record over a set of games
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
}

impl TeamStanding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
        self.points += POINTS_FOR_WIN;
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
        self.points += POINTS_FOR_DRAW;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<TeamStanding>,
    pub games_counted: usize,
}
