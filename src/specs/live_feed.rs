// src/specs/live_feed.rs
//! Live-feed *spec*: `/game/{id}/feed/live`.
//!
//! The feed is a deep, loosely-typed document. Every field is modelled as an
//! `Option` and read through a get-or-absent accessor, so a play with a missing
//! or malformed leaf still yields a row (with that cell empty).
//!
//! Shape (only what we read):
//! ```text
//! liveData
//! ├─ boxscore.teams.{home,away}.team.{triCode,id,name}
//! ├─ boxscore.teams.{home,away}.teamStats.teamSkaterStats.*
//! ├─ linescore.teams.{home,away}.goals
//! └─ plays.{allPlays[], currentPlay}
//! ```

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::lenient;
use crate::core::net::HttpClient;
use crate::error::Result;

/// The `liveData` object of one game.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameDocument {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub plays: Option<Plays>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub linescore: Option<Linescore>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub boxscore: Option<Boxscore>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plays {
    /// Entries that are not play objects are dropped.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub all_plays: Option<Vec<RawEvent>>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub current_play: Option<RawEvent>,
}

/* ---------------- boxscore ---------------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Boxscore {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub teams: Option<HomeAway<BoxscoreTeam>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct HomeAway<T> {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub home: Option<T>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub away: Option<T>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub team: Option<TeamInfo>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub team_stats: Option<TeamStats>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub tri_code: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub team_skater_stats: Option<TeamSkaterStats>,
}

/// Boxscore team totals. Percentages arrive as strings in the feed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSkaterStats {
    #[serde(default, deserialize_with = "lenient::num")]
    pub goals: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub pim: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub shots: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub power_play_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub power_play_goals: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub power_play_opportunities: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub face_off_win_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub blocked: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub takeaways: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub giveaways: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub hits: Option<f64>,
}

/* ---------------- linescore ---------------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Linescore {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub teams: Option<HomeAway<LinescoreTeam>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LinescoreTeam {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub goals: Option<u32>,
}

/* ---------------- plays ---------------- */

/// One entry of `plays.allPlays`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub players: Option<Vec<RawPlayer>>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub result: Option<EventResult>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub about: Option<About>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub coordinates: Option<RawCoords>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub team: Option<TeamInfo>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub event_type_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub secondary_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub strength: Option<Strength>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub game_winning_goal: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub empty_net: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Strength {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub period: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub period_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub period_time_remaining: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub goals: Option<Score>,
}

/// Running score embedded in each play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub home: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub away: Option<u32>,
}

/// Rink coordinates; `{}` for events without a location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawCoords {
    #[serde(default, deserialize_with = "lenient::num")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::num")]
    pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub player: Option<Person>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub player_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub full_name: Option<String>,
}

/* ---------------- accessors ---------------- */

impl RawEvent {
    /// Display name, e.g. "Blocked Shot".
    pub fn event_name(&self) -> Option<&str> {
        self.result.as_ref()?.event.as_deref()
    }

    /// Type id, e.g. "BLOCKED_SHOT".
    pub fn event_type_id(&self) -> Option<&str> {
        self.result.as_ref()?.event_type_id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.result.as_ref()?.description.as_deref()
    }

    pub fn secondary_type(&self) -> Option<&str> {
        self.result.as_ref()?.secondary_type.as_deref()
    }

    pub fn strength_name(&self) -> Option<&str> {
        self.result.as_ref()?.strength.as_ref()?.name.as_deref()
    }

    pub fn empty_net(&self) -> Option<bool> {
        self.result.as_ref()?.empty_net
    }

    pub fn game_winning_goal(&self) -> Option<bool> {
        self.result.as_ref()?.game_winning_goal
    }

    pub fn period(&self) -> Option<u32> {
        self.about.as_ref()?.period
    }

    pub fn period_time(&self) -> Option<&str> {
        self.about.as_ref()?.period_time.as_deref()
    }

    pub fn period_time_remaining(&self) -> Option<&str> {
        self.about.as_ref()?.period_time_remaining.as_deref()
    }

    pub fn date_time(&self) -> Option<&str> {
        self.about.as_ref()?.date_time.as_deref()
    }

    pub fn score(&self) -> Score {
        self.about.as_ref().and_then(|a| a.goals).unwrap_or_default()
    }

    /// triCode of the team the feed attaches to this play.
    pub fn team_code(&self) -> Option<&str> {
        self.team.as_ref()?.tri_code.as_deref()
    }

    pub fn coordinates(&self) -> Option<&RawCoords> {
        self.coordinates.as_ref()
    }

    /// Participant entries in feed order; empty when the play has none.
    pub fn players(&self) -> &[RawPlayer] {
        self.players.as_deref().unwrap_or(&[])
    }
}

impl RawPlayer {
    pub fn name(&self) -> Option<&str> {
        self.player.as_ref()?.full_name.as_deref()
    }

    pub fn id(&self) -> Option<u64> {
        self.player.as_ref()?.id
    }

    pub fn role(&self) -> Option<&str> {
        self.player_type.as_deref()
    }
}

impl RawGameDocument {
    pub fn all_plays(&self) -> Option<&[RawEvent]> {
        self.plays.as_ref()?.all_plays.as_deref()
    }

    pub fn current_play(&self) -> Option<&RawEvent> {
        self.plays.as_ref()?.current_play.as_ref()
    }

    pub fn boxscore_teams(&self) -> Option<&HomeAway<BoxscoreTeam>> {
        self.boxscore.as_ref()?.teams.as_ref()
    }

    pub fn linescore_teams(&self) -> Option<&HomeAway<LinescoreTeam>> {
        self.linescore.as_ref()?.teams.as_ref()
    }
}

impl BoxscoreTeam {
    pub fn tri_code(&self) -> Option<&str> {
        self.team.as_ref()?.tri_code.as_deref()
    }

    pub fn team_id(&self) -> Option<u64> {
        self.team.as_ref()?.id
    }

    pub fn skater_stats(&self) -> Option<&TeamSkaterStats> {
        self.team_stats.as_ref()?.team_skater_stats.as_ref()
    }
}

/* ---------------- fetch / parse ---------------- */

pub fn endpoint(game_id: &str) -> String {
    format!("/game/{}/feed/live", game_id.trim())
}

/// Fetch and unwrap `liveData` for one game.
pub fn fetch(http: &HttpClient, game_id: &str) -> Result<RawGameDocument> {
    let body = http.get_text(&endpoint(game_id))?;
    parse_doc(&body)
}

/// Accepts the full feed response (`{"gamePk":…,"liveData":{…}}`) or the bare `liveData` object.
pub fn parse_doc(text: &str) -> Result<RawGameDocument> {
    let t = Instant::now();
    let mut v: Value = serde_json::from_str(text)?;
    let inner = match v.get_mut("liveData") {
        Some(live) => live.take(),
        None => v,
    };
    let doc: RawGameDocument = serde_json::from_value(inner)?;
    logd!(
        "Live feed: parsed {} plays in {:?}",
        doc.all_plays().map_or(0, |p| p.len()),
        t.elapsed()
    );
    Ok(doc)
}
