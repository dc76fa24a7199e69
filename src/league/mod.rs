pub mod standings;
pub mod validation;

use thiserror::Error;

use crate::db::StoreError;
use crate::league::standings::StandingsError;

pub use standings::{compute_standings, StandingsService};
pub use validation::{GameValidator, ValidationError};

/// Failures on the league read path
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Standings(#[from] StandingsError),
}
