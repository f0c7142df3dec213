// src/game/tables.rs
//! Aggregator: category projections of the event table, and the boxscore.
//!
//! Each category record is a pure projection of an `EventRecord`: generic
//! player-one/two columns get semantic names and irrelevant columns are left
//! out. Projections never touch the source rows, so every table can be
//! rebuilt from the same events any number of times.

use crate::config::options::TableKind;
use crate::data::{DataSet, NamedTable, Tabular};
use crate::game::classify::{Category, EventKind};
use crate::game::context::{GameContext, Side};
use crate::game::record::{EventRecord, RecordBase, ShotRecord};
use crate::specs::live_feed::{RawGameDocument, TeamSkaterStats};

/* ---------------- category projections ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct PenaltyRecord {
    pub kind: EventKind,
    pub penalty: Option<String>,
    pub penalty_on: Option<String>,
    pub drew_by: Option<String>,
    pub penalty_team: Option<String>,
    pub drew_by_team: Option<String>,
    pub penalty_on_id: Option<u64>,
    pub drew_by_id: Option<u64>,
    pub base: RecordBase,
}

impl From<&EventRecord> for PenaltyRecord {
    fn from(r: &EventRecord) -> Self {
        Self {
            kind: r.kind,
            penalty: r.secondary_type.clone(),
            penalty_on: r.player_one_name().map(String::from),
            drew_by: r.player_two_name().map(String::from),
            penalty_team: r.player_one_team.clone(),
            drew_by_team: r.player_two_team.clone(),
            penalty_on_id: r.player_one_id(),
            drew_by_id: r.player_two_id(),
            base: r.base.clone(),
        }
    }
}

impl Tabular for PenaltyRecord {
    const HEADERS: &'static [&'static str] = &[
        "event",
        "penalty",
        "penalty_on",
        "drew_by",
        "coords",
        "period",
        "period_time_remaining",
        "penalty_team",
        "drew_by_team",
        "home_team",
        "home_team_id",
        "away_team",
        "away_team_id",
        "home_goals",
        "away_goals",
        "penalty_on_id",
        "drew_by_id",
        "game_id",
        "winning_team",
        "date",
        "description",
        "strength",
    ];

    fn to_row(&self) -> Vec<String> {
        let mut r = row![self.kind, self.penalty, self.penalty_on, self.drew_by];
        r.extend(self.base.place_cells());
        r.extend(row![self.penalty_team, self.drew_by_team]);
        r.extend(self.base.team_cells());
        r.extend(row![self.penalty_on_id, self.drew_by_id]);
        r.extend(self.base.tail_cells());
        r
    }
}

/// Giveaways and takeaways: one player, and the team that lost or won the puck.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnoverRecord {
    pub kind: EventKind,
    pub player_one: Option<String>,
    pub player_one_team: Option<String>,
    pub other_team: Option<String>,
    pub player_one_id: Option<u64>,
    pub base: RecordBase,
}

impl From<&EventRecord> for TurnoverRecord {
    fn from(r: &EventRecord) -> Self {
        Self {
            kind: r.kind,
            player_one: r.player_one_name().map(String::from),
            player_one_team: r.player_one_team.clone(),
            other_team: r.player_two_team.clone(),
            player_one_id: r.player_one_id(),
            base: r.base.clone(),
        }
    }
}

impl Tabular for TurnoverRecord {
    const HEADERS: &'static [&'static str] = &[
        "event",
        "player_one",
        "coords",
        "period",
        "period_time_remaining",
        "player_one_team",
        "other_team",
        "home_team",
        "home_team_id",
        "away_team",
        "away_team_id",
        "home_goals",
        "away_goals",
        "player_one_id",
        "game_id",
        "winning_team",
        "date",
        "description",
        "strength",
    ];

    fn to_row(&self) -> Vec<String> {
        let mut r = row![self.kind, self.player_one];
        r.extend(self.base.place_cells());
        r.extend(row![self.player_one_team, self.other_team]);
        r.extend(self.base.team_cells());
        r.extend(row![self.player_one_id]);
        r.extend(self.base.tail_cells());
        r
    }
}

/// Two-player projection shared by hits (hitter/hittee) and faceoffs (winner/loser).
#[derive(Clone, Debug, PartialEq)]
pub struct Duel {
    pub kind: EventKind,
    pub first: Option<String>,
    pub second: Option<String>,
    pub first_team: Option<String>,
    pub second_team: Option<String>,
    pub first_id: Option<u64>,
    pub second_id: Option<u64>,
    pub base: RecordBase,
}

impl From<&EventRecord> for Duel {
    fn from(r: &EventRecord) -> Self {
        Self {
            kind: r.kind,
            first: r.player_one_name().map(String::from),
            second: r.player_two_name().map(String::from),
            first_team: r.player_one_team.clone(),
            second_team: r.player_two_team.clone(),
            first_id: r.player_one_id(),
            second_id: r.player_two_id(),
            base: r.base.clone(),
        }
    }
}

impl Duel {
    fn cells(&self) -> Vec<String> {
        let mut r = row![self.kind, self.first, self.second];
        r.extend(self.base.place_cells());
        r.extend(row![self.first_team, self.second_team]);
        r.extend(self.base.team_cells());
        r.extend(row![self.first_id, self.second_id]);
        r.extend(self.base.tail_cells());
        r
    }
}

macro_rules! duel_table {
    ($name:ident, $first:literal, $second:literal) => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name(pub Duel);

        impl From<&EventRecord> for $name {
            fn from(r: &EventRecord) -> Self {
                Self(Duel::from(r))
            }
        }

        impl Tabular for $name {
            const HEADERS: &'static [&'static str] = &[
                "event",
                $first,
                $second,
                "coords",
                "period",
                "period_time_remaining",
                concat!($first, "_team"),
                concat!($second, "_team"),
                "home_team",
                "home_team_id",
                "away_team",
                "away_team_id",
                "home_goals",
                "away_goals",
                concat!($first, "_id"),
                concat!($second, "_id"),
                "game_id",
                "winning_team",
                "date",
                "description",
                "strength",
            ];

            fn to_row(&self) -> Vec<String> {
                self.0.cells()
            }
        }
    };
}

duel_table!(HitRecord, "hitter", "hittee");
duel_table!(FaceoffRecord, "winner", "loser");

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryTables {
    /// Shot-family rows of the event table, unrelabelled.
    pub shots: Vec<EventRecord>,
    pub penalties: Vec<PenaltyRecord>,
    pub turnovers: Vec<TurnoverRecord>,
    pub hits: Vec<HitRecord>,
    pub faceoffs: Vec<FaceoffRecord>,
}

impl CategoryTables {
    pub fn total(&self) -> usize {
        self.shots.len() + self.penalties.len() + self.turnovers.len() + self.hits.len() + self.faceoffs.len()
    }
}

/// Split event rows by category, keeping feed order within each table.
pub fn aggregate(records: &[EventRecord]) -> CategoryTables {
    let mut out = CategoryTables::default();
    for r in records {
        match r.kind.category() {
            Category::Shot => out.shots.push(r.clone()),
            Category::Penalty => out.penalties.push(PenaltyRecord::from(r)),
            Category::Turnover => out.turnovers.push(TurnoverRecord::from(r)),
            Category::Hit => out.hits.push(HitRecord::from(r)),
            Category::Faceoff => out.faceoffs.push(FaceoffRecord::from(r)),
        }
    }
    out
}

/* ---------------- boxscore ---------------- */

pub const STAT_COUNT: usize = 11;

/// One team's side of the boxscore with each stat paired against the opponent's.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateStatsRow {
    pub date: Option<chrono::NaiveDate>,
    pub team: String,
    pub team_id: u64,
    pub opponent: String,
    pub home: bool,
    pub win: bool,
    /// `(for, against)` in `STAT_NAMES` order.
    pub stats: [(Option<f64>, Option<f64>); STAT_COUNT],
}

/// Column stems, in `TeamSkaterStats` order.
pub const STAT_NAMES: [&str; STAT_COUNT] = [
    "goals",
    "penalty_minutes",
    "shots",
    "PPP",
    "PPG",
    "PPO",
    "faceoff_win_percentage",
    "blocked_shots",
    "takeaways",
    "giveaways",
    "hits",
];

fn stat_values(s: Option<&TeamSkaterStats>) -> [Option<f64>; STAT_COUNT] {
    let Some(s) = s else {
        return [None; STAT_COUNT];
    };
    [
        s.goals,
        s.pim,
        s.shots,
        s.power_play_percentage,
        s.power_play_goals,
        s.power_play_opportunities,
        s.face_off_win_percentage,
        s.blocked,
        s.takeaways,
        s.giveaways,
        s.hits,
    ]
}

impl AggregateStatsRow {
    pub fn stat(&self, name: &str) -> Option<(Option<f64>, Option<f64>)> {
        STAT_NAMES.iter().position(|n| *n == name).map(|i| self.stats[i])
    }
}

impl Tabular for AggregateStatsRow {
    const HEADERS: &'static [&'static str] = &[
        "date",
        "team",
        "team_id",
        "opponent",
        "home",
        "win",
        "goals_for",
        "goals_against",
        "penalty_minutes_for",
        "penalty_minutes_against",
        "shots_for",
        "shots_against",
        "PPP_for",
        "PPP_against",
        "PPG_for",
        "PPG_against",
        "PPO_for",
        "PPO_against",
        "faceoff_win_percentage_for",
        "faceoff_win_percentage_against",
        "blocked_shots_for",
        "blocked_shots_against",
        "takeaways_for",
        "takeaways_against",
        "giveaways_for",
        "giveaways_against",
        "hits_for",
        "hits_against",
    ];

    fn to_row(&self) -> Vec<String> {
        let mut r = row![self.date, self.team, self.team_id, self.opponent, self.home, self.win];
        for (f, a) in &self.stats {
            r.extend(row![f, a]);
        }
        r
    }
}

/// Home row then away row. Missing stat leaves stay empty on both sides.
pub fn boxscore(ctx: &GameContext, doc: &RawGameDocument) -> Vec<AggregateStatsRow> {
    let teams = doc.boxscore_teams();
    let home = stat_values(teams.and_then(|t| t.home.as_ref()).and_then(|t| t.skater_stats()));
    let away = stat_values(teams.and_then(|t| t.away.as_ref()).and_then(|t| t.skater_stats()));
    if home.iter().chain(&away).all(Option::is_none) {
        logw!("Game {}: no teamSkaterStats, boxscore stats left empty", ctx.game_id);
    }

    let side_row = |side: Side, own: &[Option<f64>; STAT_COUNT], opp: &[Option<f64>; STAT_COUNT]| {
        let team = ctx.team(side);
        let mut stats = [(None, None); STAT_COUNT];
        for (i, pair) in stats.iter_mut().enumerate() {
            *pair = (own[i], opp[i]);
        }
        AggregateStatsRow {
            date: ctx.date,
            team: team.code.clone(),
            team_id: team.id,
            opponent: ctx.team(side.opposite()).code.clone(),
            home: side == Side::Home,
            win: ctx.winner == side,
            stats,
        }
    };

    vec![side_row(Side::Home, &home, &away), side_row(Side::Away, &away, &home)]
}

/* ---------------- all tables of one game ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct GameTables {
    pub events: Vec<EventRecord>,
    pub shot_chart: Vec<ShotRecord>,
    pub categories: CategoryTables,
    pub boxscore: Vec<AggregateStatsRow>,
}

impl GameTables {
    pub fn new(events: Vec<EventRecord>, shot_chart: Vec<ShotRecord>, boxscore: Vec<AggregateStatsRow>) -> Self {
        let categories = aggregate(&events);
        Self { events, shot_chart, categories, boxscore }
    }

    pub fn dataset(&self, kind: TableKind) -> DataSet {
        match kind {
            TableKind::Events => DataSet::from_records(&self.events),
            TableKind::Shots => DataSet::from_records(&self.categories.shots),
            TableKind::ShotChart => DataSet::from_records(&self.shot_chart),
            TableKind::Penalties => DataSet::from_records(&self.categories.penalties),
            TableKind::Turnovers => DataSet::from_records(&self.categories.turnovers),
            TableKind::Hits => DataSet::from_records(&self.categories.hits),
            TableKind::Faceoffs => DataSet::from_records(&self.categories.faceoffs),
            TableKind::Boxscore => DataSet::from_records(&self.boxscore),
        }
    }

    pub fn named(&self, kinds: &[TableKind]) -> Vec<NamedTable> {
        kinds
            .iter()
            .map(|&kind| NamedTable { kind, data: self.dataset(kind) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::context::TeamRef;
    use crate::game::participants::Participant;
    use crate::specs::live_feed::parse_doc;

    fn ctx() -> GameContext {
        GameContext {
            game_id: s!("1"),
            home: TeamRef { code: s!("BOS"), id: 6 },
            away: TeamRef { code: s!("NYR"), id: 3 },
            home_goals: 1,
            away_goals: 4,
            date: None,
            winner: Side::Away,
        }
    }

    fn person(name: &str, id: u64, role: &str) -> Option<Participant> {
        Some(Participant { name: Some(s!(name)), id: Some(id), role: Some(s!(role)) })
    }

    fn record(kind: EventKind) -> EventRecord {
        EventRecord {
            kind,
            secondary_type: Some(s!("Tripping")),
            player_one: person("A", 1, "PenaltyOn"),
            player_two: person("B", 2, "DrewBy"),
            player_one_team: Some(s!("BOS")),
            player_two_team: Some(s!("NYR")),
            game_winning: None,
            empty_net: None,
            base: RecordBase {
                coords: None,
                period: Some(1),
                period_time_remaining: Some(s!("10:00")),
                home_team: s!("BOS"),
                home_team_id: 6,
                away_team: s!("NYR"),
                away_team_id: 3,
                home_goals: Some(0),
                away_goals: Some(0),
                game_id: s!("1"),
                winning_team: s!("NYR"),
                date: None,
                description: None,
                strength: None,
            },
        }
    }

    #[test]
    fn penalty_columns_are_relabelled() {
        let t = aggregate(&[record(EventKind::Penalty)]);
        let p = &t.penalties[0];
        assert_eq!(p.penalty.as_deref(), Some("Tripping"));
        assert_eq!(p.penalty_on.as_deref(), Some("A"));
        assert_eq!(p.drew_by_id, Some(2));
        assert_eq!(p.to_row().len(), PenaltyRecord::HEADERS.len());
        assert!(!PenaltyRecord::HEADERS.contains(&"empty_net"));
        assert!(!PenaltyRecord::HEADERS.contains(&"player_one_role"));
    }

    #[test]
    fn turnovers_have_one_player_and_other_team() {
        let t = aggregate(&[record(EventKind::Giveaway), record(EventKind::Takeaway)]);
        assert_eq!(t.turnovers.len(), 2);
        assert_eq!(t.turnovers[1].other_team.as_deref(), Some("NYR"));
        assert!(TurnoverRecord::HEADERS.contains(&"other_team"));
        assert!(!TurnoverRecord::HEADERS.contains(&"player_two"));
        assert!(!TurnoverRecord::HEADERS.contains(&"secondary_type"));
        assert_eq!(t.turnovers[0].to_row().len(), TurnoverRecord::HEADERS.len());
    }

    #[test]
    fn hit_and_faceoff_headers() {
        assert_eq!(HitRecord::HEADERS[1], "hitter");
        assert_eq!(HitRecord::HEADERS[7], "hittee_team");
        assert_eq!(FaceoffRecord::HEADERS[15], "loser_id");
        let t = aggregate(&[record(EventKind::Hit), record(EventKind::Faceoff)]);
        assert_eq!(t.hits[0].0.first.as_deref(), Some("A"));
        assert_eq!(t.faceoffs[0].to_row().len(), FaceoffRecord::HEADERS.len());
    }

    #[test]
    fn categories_partition_every_row() {
        let rows: Vec<EventRecord> = EventKind::ALL.iter().map(|&k| record(k)).collect();
        let t = aggregate(&rows);
        assert_eq!(t.total(), rows.len());
        assert_eq!(t.shots.len(), 4);
    }

    #[test]
    fn boxscore_for_mirrors_against() {
        let doc = parse_doc(
            r#"{"boxscore": {"teams": {
                "home": {"team": {"id": 6, "triCode": "BOS"},
                         "teamStats": {"teamSkaterStats": {"goals": 1, "pim": 6, "shots": 30, "hits": 20}}},
                "away": {"team": {"id": 3, "triCode": "NYR"},
                         "teamStats": {"teamSkaterStats": {"goals": 4, "pim": 8, "shots": 25}}}}}}"#,
        )
        .unwrap();
        let rows = boxscore(&ctx(), &doc);
        assert_eq!(rows.len(), 2);
        let (home, away) = (&rows[0], &rows[1]);
        assert!(home.home && !away.home);
        assert!(!home.win && away.win);
        assert_eq!(home.opponent, "NYR");
        for i in 0..STAT_COUNT {
            assert_eq!(home.stats[i].0, away.stats[i].1);
            assert_eq!(home.stats[i].1, away.stats[i].0);
        }
        assert_eq!(home.stat("hits"), Some((Some(20.0), None)));
        assert_eq!(home.to_row().len(), AggregateStatsRow::HEADERS.len());
    }
}
