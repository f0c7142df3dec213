// src/specs/schedule.rs
// `/schedule?season=S&teamId=T` flattened from `dates[].games[]`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::lenient;
use crate::core::net::HttpClient;
use crate::error::Result;
use crate::specs::live_feed::{HomeAway, TeamInfo};

#[derive(Clone, Debug, Default, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<ScheduledGame>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    #[serde(default, deserialize_with = "lenient::id")]
    pub game_pk: Option<u64>,
    /// "PR" preseason, "R" regular season, "P" playoffs.
    #[serde(default, deserialize_with = "lenient::opt")]
    pub game_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub game_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub status: Option<GameStatus>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub teams: Option<HomeAway<ScheduledSide>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub abstract_game_state: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub detailed_state: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ScheduledSide {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub score: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub team: Option<TeamInfo>,
}

impl ScheduledGame {
    pub fn is_final(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.detailed_state.as_deref())
            .is_some_and(|s| s == "Final")
    }

    pub fn is_preseason(&self) -> bool {
        self.game_type.as_deref() == Some("PR")
    }

    pub fn is_postseason(&self) -> bool {
        self.game_type.as_deref() == Some("P")
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.game_date.as_deref().and_then(lenient::parse_date)
    }
}

pub fn endpoint(team_id: &str, season: &str) -> String {
    format!("/schedule?season={}&teamId={}", season.trim(), team_id.trim())
}

pub fn fetch(http: &HttpClient, team_id: &str, season: &str) -> Result<Vec<ScheduledGame>> {
    let body = http.get_text(&endpoint(team_id, season))?;
    parse_doc(&body)
}

pub fn parse_doc(text: &str) -> Result<Vec<ScheduledGame>> {
    let resp: ScheduleResponse = serde_json::from_str(text)?;
    Ok(resp.dates.into_iter().flat_map(|d| d.games).collect())
}
