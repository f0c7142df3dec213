// src/game/participants.rs
//! Who took part in a play, and for which team.
//!
//! Two rules:
//! - `general`: first listed player is primary, last listed is secondary,
//!   unless the goal was into an empty net or first and last are the same person.
//! - `shot`:    Shooter/Scorer is primary, Goalie/Blocker is secondary
//!   (assists are ignored). For blocked shots the play's team is the
//!   *blocking* team, so the shooter plays for the other one.
//!
//! Team codes are resolved against the two game teams. A play without a team
//! leaves both team fields empty; a play naming a third team is an error.

use crate::error::Result;
use crate::game::classify::EventKind;
use crate::game::context::GameContext;
use crate::specs::live_feed::{RawEvent, RawPlayer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Participant {
    pub name: Option<String>,
    pub id: Option<u64>,
    pub role: Option<String>,
}

impl Participant {
    pub fn from_raw(p: &RawPlayer) -> Self {
        Self {
            name: p.name().map(String::from),
            id: p.id(),
            role: p.role().map(String::from),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Participants {
    pub primary: Option<Participant>,
    pub secondary: Option<Participant>,
    pub primary_team: Option<String>,
    pub secondary_team: Option<String>,
}

pub fn general(ev: &RawEvent, ctx: &GameContext) -> Result<Participants> {
    let players = ev.players();
    let primary = players.first().map(Participant::from_raw);

    let secondary = match players {
        _ if ev.empty_net() == Some(true) => None,
        [first, .., last] if first.name().is_some() && first.name() == last.name() => None,
        [_, .., last] => Some(Participant::from_raw(last)),
        _ => None,
    };

    let (primary_team, secondary_team) = match ev.team_code() {
        Some(code) => {
            let (own, other) = ctx.teams_of(code)?;
            (Some(own.code.clone()), Some(other.code.clone()))
        }
        None => (None, None),
    };

    Ok(Participants { primary, secondary, primary_team, secondary_team })
}

pub fn shot(ev: &RawEvent, kind: EventKind, ctx: &GameContext) -> Result<Participants> {
    let mut shooter = None;
    let mut other = None;
    for p in ev.players() {
        match p.role() {
            Some("Shooter" | "Scorer") => shooter = Some(Participant::from_raw(p)),
            Some("Goalie" | "Blocker") => other = Some(Participant::from_raw(p)),
            _ => {}
        }
    }

    let (shooter_team, other_team) = match ev.team_code() {
        Some(code) => {
            let (own, opponent) = ctx.teams_of(code)?;
            let (code, opponent) = (own.code.clone(), opponent.code.clone());
            if kind == EventKind::BlockedShot {
                (Some(opponent), Some(code))
            } else {
                (Some(code), Some(opponent))
            }
        }
        None => (None, None),
    };

    Ok(Participants {
        primary: shooter,
        secondary: other,
        primary_team: shooter_team,
        secondary_team: other_team,
    })
}
