// src/game/classify.rs
//! Event classification.
//!
//! Every play falls in exactly one bucket:
//! - `Game(kind)`   retained and turned into a row,
//! - `Unhandled(_)` recognised but not processed yet (stoppages, fights, ...),
//! - `Structural`   period and game markers,
//! - `Unknown`      anything else; dropped like structural events.
//!
//! Matching runs on a normalised key: trimmed, lower-cased, with spaces and
//! hyphens turned into underscores. The display name (`result.event`) is
//! tried first and the type id (`result.eventTypeId`) second, so both
//! "Blocked Shot" and "BLOCKED_SHOT" land on `blocked_shot`.

use crate::data::ToCell;
use crate::specs::live_feed::RawEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Faceoff,
    Hit,
    Giveaway,
    Takeaway,
    Penalty,
    Shot,
    MissedShot,
    BlockedShot,
    Goal,
}

/// Which category table a retained event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Shot,
    Penalty,
    Turnover,
    Hit,
    Faceoff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnhandledKind {
    Stoppage,
    Substitution,
    Fight,
    EmergencyGoaltender,
    OfficialChallenge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classified {
    Game(EventKind),
    Unhandled(UnhandledKind),
    Structural,
    Unknown,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Faceoff,
        EventKind::Hit,
        EventKind::Giveaway,
        EventKind::Takeaway,
        EventKind::Penalty,
        EventKind::Shot,
        EventKind::MissedShot,
        EventKind::BlockedShot,
        EventKind::Goal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Faceoff => "faceoff",
            EventKind::Hit => "hit",
            EventKind::Giveaway => "giveaway",
            EventKind::Takeaway => "takeaway",
            EventKind::Penalty => "penalty",
            EventKind::Shot => "shot",
            EventKind::MissedShot => "missed_shot",
            EventKind::BlockedShot => "blocked_shot",
            EventKind::Goal => "goal",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            EventKind::Shot | EventKind::MissedShot | EventKind::BlockedShot | EventKind::Goal => {
                Category::Shot
            }
            EventKind::Penalty => Category::Penalty,
            EventKind::Giveaway | EventKind::Takeaway => Category::Turnover,
            EventKind::Hit => Category::Hit,
            EventKind::Faceoff => Category::Faceoff,
        }
    }

    pub fn is_shot_family(&self) -> bool {
        self.category() == Category::Shot
    }

    /// Result label of a shot-family event: shot | missed | blocked | goal.
    pub fn shot_result(&self) -> Option<&'static str> {
        match self {
            EventKind::Shot => Some("shot"),
            EventKind::MissedShot => Some("missed"),
            EventKind::BlockedShot => Some("blocked"),
            EventKind::Goal => Some("goal"),
            _ => None,
        }
    }
}

impl ToCell for EventKind {
    fn to_cell(&self) -> String {
        s!(self.as_str())
    }
}

impl Classified {
    pub fn is_retained(&self) -> bool {
        matches!(self, Classified::Game(_))
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Classified::Game(k) => Some(*k),
            _ => None,
        }
    }
}

pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Classify an already normalised key. Unrecognised keys are `Unknown`.
pub fn classify_key(key: &str) -> Classified {
    use Classified::*;
    use EventKind::*;
    use UnhandledKind::*;

    match key {
        "faceoff" => Game(Faceoff),
        "hit" => Game(Hit),
        "giveaway" => Game(Giveaway),
        "takeaway" => Game(Takeaway),
        "penalty" => Game(Penalty),
        "shot" => Game(Shot),
        "missed_shot" => Game(MissedShot),
        "blocked_shot" => Game(BlockedShot),
        "goal" => Game(Goal),

        "stoppage" => Unhandled(Stoppage),
        "sub" => Unhandled(Substitution),
        "fight" => Unhandled(Fight),
        "emergency_goaltender" => Unhandled(EmergencyGoaltender),
        "official_challenge" | "challenge" => Unhandled(OfficialChallenge),

        "unknown"
        | "period_start"
        | "period_end"
        | "period_ready"
        | "period_official"
        | "game_scheduled"
        | "game_end"
        | "game_official"
        | "early_intermission_start"
        | "early_intermission_end"
        | "early_int_start"
        | "early_int_end"
        | "shootout_complete" => Structural,

        _ => Unknown,
    }
}

/// Never fails: a play with no usable event name is `Unknown`.
pub fn classify(ev: &RawEvent) -> Classified {
    let mut out = Classified::Unknown;
    for raw in [ev.event_name(), ev.event_type_id()].into_iter().flatten() {
        out = classify_key(&normalize_key(raw));
        if out != Classified::Unknown {
            break;
        }
    }
    out
}
