// src/source.rs
//! Where raw documents come from.
//!
//! `FeedSource` is the seam between the transformation core and the network:
//! `game::Game` and `scrape::*` only ever talk to this trait. `NhlApi` is the
//! HTTP implementation; tests plug in an in-memory source.

use crate::config::options::FetchOptions;
use crate::core::net::HttpClient;
use crate::error::Result;
use crate::specs::live_feed::{self, RawGameDocument};
use crate::specs::roster::{self, RosterEntry};
use crate::specs::schedule::{self, ScheduledGame};
use crate::specs::seasons;

pub trait FeedSource {
    /// `liveData` of one game.
    fn live_data(&self, game_id: &str) -> Result<RawGameDocument>;

    /// Roster of a team; `None` means the active roster.
    fn team_roster(&self, team_id: &str, season: Option<&str>) -> Result<Vec<RosterEntry>>;

    fn schedule(&self, team_id: &str, season: &str) -> Result<Vec<ScheduledGame>>;

    fn current_season(&self) -> Result<String>;
}

impl<S: FeedSource + ?Sized> FeedSource for &S {
    fn live_data(&self, game_id: &str) -> Result<RawGameDocument> {
        (**self).live_data(game_id)
    }

    fn team_roster(&self, team_id: &str, season: Option<&str>) -> Result<Vec<RosterEntry>> {
        (**self).team_roster(team_id, season)
    }

    fn schedule(&self, team_id: &str, season: &str) -> Result<Vec<ScheduledGame>> {
        (**self).schedule(team_id, season)
    }

    fn current_season(&self) -> Result<String> {
        (**self).current_season()
    }
}

/// The public stats API over blocking HTTP.
#[derive(Clone, Debug)]
pub struct NhlApi {
    http: HttpClient,
}

impl NhlApi {
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        Ok(Self { http: HttpClient::new(opts)? })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

impl FeedSource for NhlApi {
    fn live_data(&self, game_id: &str) -> Result<RawGameDocument> {
        live_feed::fetch(&self.http, game_id)
    }

    fn team_roster(&self, team_id: &str, season: Option<&str>) -> Result<Vec<RosterEntry>> {
        roster::fetch(&self.http, team_id, season)
    }

    fn schedule(&self, team_id: &str, season: &str) -> Result<Vec<ScheduledGame>> {
        schedule::fetch(&self.http, team_id, season)
    }

    fn current_season(&self) -> Result<String> {
        seasons::fetch_current(&self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_builds_urls_under_base() {
        let opts = FetchOptions { base_url: s!("http://localhost:9/api/v1/"), ..FetchOptions::default() };
        let api = NhlApi::new(&opts).unwrap();
        assert_eq!(
            api.http().url_for(&live_feed::endpoint("2019020001")),
            "http://localhost:9/api/v1/game/2019020001/feed/live"
        );
    }
}
