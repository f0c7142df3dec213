// src/game/record.rs
//! Record builder: one flat row per retained play.
//!
//! `EventRecord` is the general table (positions as recorded). `ShotRecord`
//! is the shot chart: shot-family plays only, shooter/goalie roles, and
//! positions mirrored on even periods so every shot points at the same net.

use chrono::NaiveDate;

use crate::data::Tabular;
use crate::error::Result;
use crate::game::classify::{self, Classified, EventKind};
use crate::game::context::GameContext;
use crate::game::coords::{self, Coords, Mirror};
use crate::game::participants::{self, Participant, Participants};
use crate::specs::live_feed::RawEvent;

/// Columns every event-derived table carries.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordBase {
    pub coords: Option<Coords>,
    pub period: Option<u32>,
    pub period_time_remaining: Option<String>,
    pub home_team: String,
    pub home_team_id: u64,
    pub away_team: String,
    pub away_team_id: u64,
    /// Running score when the play happened.
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub game_id: String,
    pub winning_team: String,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Lower-cased strength name ("even", "power play", ...).
    pub strength: Option<String>,
}

impl RecordBase {
    /// `coords, period, period_time_remaining`
    pub fn place_cells(&self) -> Vec<String> {
        row![self.coords, self.period, self.period_time_remaining]
    }

    /// `home_team .. away_goals`
    pub fn team_cells(&self) -> Vec<String> {
        row![
            self.home_team,
            self.home_team_id,
            self.away_team,
            self.away_team_id,
            self.home_goals,
            self.away_goals,
        ]
    }

    /// `game_id, winning_team, date, description, strength`
    pub fn tail_cells(&self) -> Vec<String> {
        row![self.game_id, self.winning_team, self.date, self.description, self.strength]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub kind: EventKind,
    pub secondary_type: Option<String>,
    pub player_one: Option<Participant>,
    pub player_two: Option<Participant>,
    pub player_one_team: Option<String>,
    pub player_two_team: Option<String>,
    pub game_winning: Option<bool>,
    pub empty_net: Option<bool>,
    pub base: RecordBase,
}

fn name(p: &Option<Participant>) -> Option<&str> {
    p.as_ref()?.name.as_deref()
}

fn id(p: &Option<Participant>) -> Option<u64> {
    p.as_ref()?.id
}

fn role(p: &Option<Participant>) -> Option<&str> {
    p.as_ref()?.role.as_deref()
}

impl EventRecord {
    pub fn player_one_name(&self) -> Option<&str> {
        name(&self.player_one)
    }

    pub fn player_one_id(&self) -> Option<u64> {
        id(&self.player_one)
    }

    pub fn player_two_name(&self) -> Option<&str> {
        name(&self.player_two)
    }

    pub fn player_two_id(&self) -> Option<u64> {
        id(&self.player_two)
    }
}

impl Tabular for EventRecord {
    const HEADERS: &'static [&'static str] = &[
        "event",
        "secondary_type",
        "player_one",
        "player_one_role",
        "player_two",
        "player_two_role",
        "coords",
        "period",
        "period_time_remaining",
        "player_one_team",
        "player_two_team",
        "home_team",
        "home_team_id",
        "away_team",
        "away_team_id",
        "home_goals",
        "away_goals",
        "game_winning",
        "empty_net",
        "player_one_id",
        "player_two_id",
        "game_id",
        "winning_team",
        "date",
        "description",
        "strength",
    ];

    fn to_row(&self) -> Vec<String> {
        let mut r = row![
            self.kind,
            self.secondary_type,
            self.player_one_name(),
            role(&self.player_one),
            self.player_two_name(),
            role(&self.player_two),
        ];
        r.extend(self.base.place_cells());
        r.extend(row![self.player_one_team, self.player_two_team]);
        r.extend(self.base.team_cells());
        r.extend(row![
            self.game_winning,
            self.empty_net,
            self.player_one_id(),
            self.player_two_id(),
        ]);
        r.extend(self.base.tail_cells());
        r
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShotRecord {
    pub shooter: Option<String>,
    /// shot | missed | blocked | goal
    pub result: &'static str,
    /// Goalie or blocker.
    pub other: Option<String>,
    pub shot_type: Option<String>,
    pub coords: Option<Coords>,
    pub period: Option<u32>,
    pub period_time: Option<String>,
    pub shooter_team: Option<String>,
    pub other_team: Option<String>,
}

impl Tabular for ShotRecord {
    const HEADERS: &'static [&'static str] = &[
        "shooter",
        "result",
        "other",
        "shotType",
        "coords",
        "period",
        "periodTime",
        "shooterTeam",
        "otherTeam",
    ];

    fn to_row(&self) -> Vec<String> {
        row![
            self.shooter,
            self.result,
            self.other,
            self.shot_type,
            self.coords,
            self.period,
            self.period_time,
            self.shooter_team,
            self.other_team,
        ]
    }
}

/// Pure merge of one play's pieces with the game context.
pub fn build_record(
    ev: &RawEvent,
    kind: EventKind,
    participants: Participants,
    coords: Option<Coords>,
    ctx: &GameContext,
) -> EventRecord {
    let score = ev.score();
    EventRecord {
        kind,
        secondary_type: ev.secondary_type().map(String::from),
        player_one: participants.primary,
        player_two: participants.secondary,
        player_one_team: participants.primary_team,
        player_two_team: participants.secondary_team,
        game_winning: ev.game_winning_goal(),
        empty_net: ev.empty_net(),
        base: RecordBase {
            coords,
            period: ev.period(),
            period_time_remaining: ev.period_time_remaining().map(String::from),
            home_team: ctx.home.code.clone(),
            home_team_id: ctx.home.id,
            away_team: ctx.away.code.clone(),
            away_team_id: ctx.away.id,
            home_goals: score.home,
            away_goals: score.away,
            game_id: ctx.game_id.clone(),
            winning_team: ctx.winner_team().code.clone(),
            date: ctx.date,
            description: ev.description().map(String::from),
            strength: ev.strength_name().map(|s| s.to_lowercase()),
        },
    }
}

/// One record per retained play, in feed order. Structural, reserved and
/// unknown plays are skipped.
pub fn build_event_records(plays: &[RawEvent], ctx: &GameContext) -> Result<Vec<EventRecord>> {
    let mut out = Vec::with_capacity(plays.len());
    let mut reserved = 0usize;

    for ev in plays {
        let kind = match classify::classify(ev) {
            Classified::Game(kind) => kind,
            Classified::Unhandled(_) => {
                reserved += 1;
                continue;
            }
            Classified::Structural | Classified::Unknown => continue,
        };
        let who = participants::general(ev, ctx)?;
        let at = coords::normalize(ev.coordinates(), ev.period(), Mirror::Off);
        out.push(build_record(ev, kind, who, at, ctx));
    }

    logd!(
        "Game {}: {} event rows from {} plays ({} reserved skipped)",
        ctx.game_id,
        out.len(),
        plays.len(),
        reserved
    );
    Ok(out)
}

/// Shot chart rows, in feed order.
pub fn build_shot_records(plays: &[RawEvent], ctx: &GameContext) -> Result<Vec<ShotRecord>> {
    let mut out = Vec::new();

    for ev in plays {
        let Some(kind) = classify::classify(ev).kind().filter(EventKind::is_shot_family) else {
            continue;
        };
        let Some(result) = kind.shot_result() else {
            continue;
        };
        let who = participants::shot(ev, kind, ctx)?;
        let period = ev.period();

        out.push(ShotRecord {
            shooter: who.primary.and_then(|p| p.name),
            result,
            other: who.secondary.and_then(|p| p.name),
            shot_type: ev.secondary_type().map(String::from),
            coords: coords::normalize(ev.coordinates(), period, Mirror::EvenPeriods),
            period,
            period_time: ev.period_time().map(String::from),
            shooter_team: who.primary_team,
            other_team: who.secondary_team,
        });
    }

    logd!("Game {}: {} shot chart rows", ctx.game_id, out.len());
    Ok(out)
}
