pub mod game_queries;
pub mod user_queries;

pub use game_queries::{LeagueStore, StoreError};
