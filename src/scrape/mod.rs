// src/scrape/mod.rs
//! Orchestration over a `FeedSource`: one game, many games through a worker
//! pool, a team's season, a team's roster.
mod games;
mod season;

pub use games::{Batch, collect_game, collect_games};
pub use season::{ScheduleFilter, SeasonLog, collect_roster, collect_season, season_game_ids};
