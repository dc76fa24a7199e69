pub mod auth;
pub mod common;
pub mod game;
pub mod standing;
pub mod team;
pub mod user;
