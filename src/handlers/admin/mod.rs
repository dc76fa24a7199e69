pub mod game_handler;
pub mod team_handler;
