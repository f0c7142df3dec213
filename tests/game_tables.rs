// tests/game_tables.rs
//
// End-to-end checks of one game's tables over a recorded live feed
// (BOS home vs NYR away, 2-1, empty-net winner in the third).
//
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use nhl_scrape::data::{DataSet, Tabular};
use nhl_scrape::error::{FeedError, Result};
use nhl_scrape::game::Game;
use nhl_scrape::game::classify::{self, EventKind};
use nhl_scrape::game::coords::Coords;
use nhl_scrape::game::record::{EventRecord, ShotRecord};
use nhl_scrape::game::tables::AggregateStatsRow;
use nhl_scrape::scrape::{self, ScheduleFilter};
use nhl_scrape::source::FeedSource;
use nhl_scrape::specs::live_feed::{self, RawGameDocument};
use nhl_scrape::specs::roster::{self, PositionGroup, RosterEntry};
use nhl_scrape::specs::schedule::{self, ScheduledGame};

const GAME_ID: &str = "2019020010";

fn load_feed() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/live_feed.json"))
        .expect("read tests/fixtures/live_feed.json")
}

fn game() -> Game {
    let doc = live_feed::parse_doc(&load_feed()).unwrap();
    Game::from_document(GAME_ID, doc).unwrap()
}

fn retained_plays(doc: &RawGameDocument) -> usize {
    doc.all_plays()
        .unwrap()
        .iter()
        .filter(|ev| classify::classify(ev).is_retained())
        .count()
}

/// Serves the fixture for every known id; anything else fails.
struct Recorded {
    feed: String,
    schedule: Vec<ScheduledGame>,
    roster: Vec<RosterEntry>,
    live_calls: AtomicUsize,
}

impl Recorded {
    fn new() -> Self {
        let schedule = schedule::parse_doc(
            r#"{"dates": [
                {"games": [{"gamePk": 2019010050, "gameType": "PR", "season": "20192020",
                            "status": {"detailedState": "Final"}}]},
                {"games": [{"gamePk": 2019020010, "gameType": "R", "season": "20192020",
                            "status": {"detailedState": "Final"}}]},
                {"games": [{"gamePk": 2019020010, "gameType": "R", "season": "20192020",
                            "status": {"detailedState": "Final"}}]},
                {"games": [{"gamePk": 2019020999, "gameType": "R", "season": "20192020",
                            "status": {"detailedState": "Final"}}]},
                {"games": [{"gamePk": 2019021100, "gameType": "R", "season": "20192020",
                            "status": {"detailedState": "Scheduled"}}]},
                {"games": [{"gamePk": 2019030111, "gameType": "P", "season": "20192020",
                            "status": {"detailedState": "Final"}}]}
            ]}"#,
        )
        .unwrap();
        let roster = roster::parse_doc(
            r#"{"roster": [
                {"person": {"id": 8470638, "fullName": "Patrice Bergeron"}, "jerseyNumber": "37", "position": {"code": "C"}},
                {"person": {"id": 8465009, "fullName": "Zdeno Chara"}, "jerseyNumber": "33", "position": {"code": "D"}},
                {"person": {"id": 8471695, "fullName": "Tuukka Rask"}, "jerseyNumber": "40", "position": {"code": "G"}}
            ]}"#,
        )
        .unwrap();
        Self { feed: load_feed(), schedule, roster, live_calls: AtomicUsize::new(0) }
    }
}

impl FeedSource for Recorded {
    fn live_data(&self, game_id: &str) -> Result<RawGameDocument> {
        self.live_calls.fetch_add(1, Ordering::Relaxed);
        match game_id {
            GAME_ID | "2019010050" | "2019030111" => live_feed::parse_doc(&self.feed),
            other => Err(FeedError::Status { status: 404, url: format!("/game/{other}/feed/live") }),
        }
    }

    fn team_roster(&self, _team_id: &str, _season: Option<&str>) -> Result<Vec<RosterEntry>> {
        Ok(self.roster.clone())
    }

    fn schedule(&self, _team_id: &str, _season: &str) -> Result<Vec<ScheduledGame>> {
        Ok(self.schedule.clone())
    }

    fn current_season(&self) -> Result<String> {
        Ok("20192020".to_string())
    }
}

#[test]
fn one_row_per_retained_play() {
    let mut g = game();
    let expected = retained_plays(g.document());
    assert_eq!(expected, 11);
    assert_eq!(g.events().unwrap().len(), expected);
}

#[test]
fn context_reads_teams_score_and_date() {
    let g = game();
    let ctx = g.context();
    assert_eq!((ctx.home.code.as_str(), ctx.home.id), ("BOS", 6));
    assert_eq!((ctx.away.code.as_str(), ctx.away.id), ("NYR", 3));
    assert_ne!(ctx.home.code, ctx.away.code);
    assert_eq!((ctx.home_goals, ctx.away_goals), (2, 1));
    assert_eq!(ctx.winner_team().code, "BOS");
    assert_eq!(ctx.date, NaiveDate::from_ymd_opt(2019, 10, 3));
}

#[test]
fn every_row_carries_game_columns() {
    let mut g = game();
    for r in g.events().unwrap() {
        assert_eq!(r.base.game_id, GAME_ID);
        assert_eq!(r.base.home_team, "BOS");
        assert_eq!(r.base.away_team, "NYR");
        assert_eq!(r.base.winning_team, "BOS");
        assert_eq!(r.to_row().len(), EventRecord::HEADERS.len());
    }
}

#[test]
fn event_order_follows_feed() {
    let mut g = game();
    let kinds: Vec<EventKind> = g.events().unwrap().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Faceoff,
            EventKind::Hit,
            EventKind::Shot,
            EventKind::Giveaway,
            EventKind::Penalty,
            EventKind::Goal,
            EventKind::BlockedShot,
            EventKind::MissedShot,
            EventKind::Goal,
            EventKind::Takeaway,
            EventKind::Goal,
        ]
    );
}

#[test]
fn empty_net_goal_has_scorer_only() {
    let mut g = game();
    let events = g.events().unwrap();
    let en = events.iter().find(|r| r.empty_net == Some(true)).unwrap();
    assert_eq!(en.player_one_name(), Some("Brad Marchand"));
    assert!(en.player_two.is_none());
    assert_eq!(en.game_winning, Some(true));
    assert_eq!(en.player_one_team.as_deref(), Some("BOS"));
    assert_eq!(en.player_two_team.as_deref(), Some("NYR"));
}

#[test]
fn goal_second_player_is_last_listed() {
    let mut g = game();
    let events = g.events().unwrap();
    let pp_goal = &events[5];
    assert_eq!(pp_goal.player_one_name(), Some("Mika Zibanejad"));
    assert_eq!(pp_goal.player_two_name(), Some("Tuukka Rask"));
    assert_eq!(pp_goal.base.strength.as_deref(), Some("power play"));
    assert_eq!((pp_goal.base.home_goals, pp_goal.base.away_goals), (Some(0), Some(1)));
}

#[test]
fn blocked_shot_in_second_period() {
    let mut g = game();
    let chart = g.shot_chart().unwrap().to_vec();
    let blocked = chart.iter().find(|s| s.result == "blocked").unwrap();
    assert_eq!(
        *blocked,
        ShotRecord {
            shooter: Some("Jacob Trouba".into()),
            result: "blocked",
            other: Some("Zdeno Chara".into()),
            shot_type: None,
            coords: Some(Coords { x: -10.0, y: 5.0 }),
            period: Some(2),
            period_time: Some("05:00".into()),
            shooter_team: Some("NYR".into()),
            other_team: Some("BOS".into()),
        }
    );

    // the event table keeps the raw position and the play's own team
    let events = g.events().unwrap();
    let row = events.iter().find(|r| r.kind == EventKind::BlockedShot).unwrap();
    assert_eq!(row.base.coords, Some(Coords { x: 10.0, y: -5.0 }));
    assert_eq!(row.player_one_team.as_deref(), Some("BOS"));
}

#[test]
fn shot_chart_mirrors_even_periods_only() {
    let mut g = game();
    let chart = g.shot_chart().unwrap().to_vec();
    assert_eq!(chart.len(), 6);

    let events = g.events().unwrap();
    let shots: Vec<&EventRecord> = events.iter().filter(|r| r.kind.is_shot_family()).collect();
    assert_eq!(shots.len(), chart.len());

    for (ev, s) in shots.iter().zip(&chart) {
        let raw = ev.base.coords.unwrap();
        match s.period {
            Some(p) if p % 2 == 0 => assert_eq!(s.coords, Some(-raw)),
            _ => assert_eq!(s.coords, Some(raw)),
        }
    }
}

#[test]
fn shot_chart_rows_render_coordinates() {
    let mut g = game();
    let ds = DataSet::from_records(g.shot_chart().unwrap());
    assert_eq!(ds.headers.as_deref().unwrap()[3], "shotType");
    let coords = ds.column("coords").unwrap();
    assert_eq!(ds.rows[0][coords], "(75, -10)");
    assert_eq!(ds.rows[3][coords], "(70, -12)");
    assert_eq!(ds.rows[3][1], "missed");
    assert_eq!(ds.rows[3][2], "");
}

#[test]
fn categories_partition_the_event_table() {
    let mut g = game();
    let t = g.tables().unwrap();
    let c = &t.categories;
    assert_eq!(c.total(), t.events.len());
    assert_eq!(c.shots.len(), 6);
    assert_eq!(c.penalties.len(), 1);
    assert_eq!(c.turnovers.len(), 2);
    assert_eq!(c.hits.len(), 1);
    assert_eq!(c.faceoffs.len(), 1);

    let pen = &c.penalties[0];
    assert_eq!(pen.penalty.as_deref(), Some("Tripping"));
    assert_eq!(pen.penalty_on.as_deref(), Some("Charlie McAvoy"));
    assert_eq!(pen.drew_by.as_deref(), Some("Chris Kreider"));

    let giveaway = &c.turnovers[0];
    assert_eq!(giveaway.player_one_team.as_deref(), Some("NYR"));
    assert_eq!(giveaway.other_team.as_deref(), Some("BOS"));

    assert_eq!(c.hits[0].0.first.as_deref(), Some("Brendan Smith"));
    assert_eq!(c.faceoffs[0].0.second.as_deref(), Some("Mika Zibanejad"));
}

#[test]
fn tables_are_idempotent() {
    let mut g = game();
    let first = g.tables().unwrap();
    let second = g.tables().unwrap();
    assert_eq!(first, second);
    assert_eq!(g.version(), 0);
}

#[test]
fn refresh_rebuilds_from_new_document() {
    let source = Recorded::new();
    let mut g = Game::fetch(&source, GAME_ID).unwrap();
    let before = g.tables().unwrap();
    g.refresh(&source).unwrap();
    assert_eq!(g.version(), 1);
    assert_eq!(g.tables().unwrap(), before);
    assert_eq!(source.live_calls.load(Ordering::Relaxed), 2);
}

#[test]
fn boxscore_for_and_against_mirror() {
    let g = game();
    let rows = g.boxscore();
    assert_eq!(rows.len(), 2);
    let (home, away) = (&rows[0], &rows[1]);
    assert!(home.home && !away.home);
    assert!(home.win && !away.win);
    assert_eq!(home.opponent, "NYR");

    for (h, a) in home.stats.iter().zip(&away.stats) {
        assert_eq!(h.0, a.1);
        assert_eq!(h.1, a.0);
    }
    assert_eq!(home.stat("goals"), Some((Some(2.0), Some(1.0))));
    assert_eq!(home.stat("faceoff_win_percentage"), Some((Some(52.3), Some(47.7))));
    assert_eq!(away.stat("PPG"), Some((Some(1.0), Some(0.0))));

    let ds = DataSet::from_records(rows);
    assert_eq!(ds.rows[0].len(), AggregateStatsRow::HEADERS.len());
    assert_eq!(ds.rows[0][0], "2019-10-03");
}

#[test]
fn third_team_fails_the_game() {
    let mut doc = live_feed::parse_doc(&load_feed()).unwrap();
    let plays = doc.plays.as_mut().unwrap().all_plays.as_mut().unwrap();
    let hit = plays
        .iter_mut()
        .find(|ev| ev.event_type_id() == Some("HIT"))
        .unwrap();
    hit.team.as_mut().unwrap().tri_code = Some("TOR".into());

    let mut g = Game::from_document(GAME_ID, doc).unwrap();
    assert!(matches!(g.events(), Err(FeedError::UnresolvableTeam { .. })));
}

#[test]
fn collect_games_keeps_order_and_reports_failures() {
    let source = Recorded::new();
    let ids: Vec<String> = ["2019020999", GAME_ID, "2019010050"].iter().map(|s| s.to_string()).collect();
    let batch = scrape::collect_games(&source, &ids, 2, None);

    let got: Vec<&str> = batch.games.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(got, vec![GAME_ID, "2019010050"]);
    assert_eq!(batch.failed.len(), 1);
    assert_eq!(batch.failed[0].0, "2019020999");
    assert_eq!(batch.games[0].1.events.len(), 11);
}

#[test]
fn season_keeps_completed_regular_games() {
    let source = Recorded::new();
    let ids = scrape::season_game_ids(&source, "bos", None, ScheduleFilter::default()).unwrap();
    assert_eq!(ids, vec![GAME_ID.to_string(), "2019020999".to_string()]);

    let all = ScheduleFilter { include_preseason: true, include_postseason: true };
    let ids = scrape::season_game_ids(&source, "6", Some("20192020"), all).unwrap();
    assert_eq!(ids.len(), 4);
}

#[test]
fn season_log_has_only_the_teams_rows() {
    let source = Recorded::new();
    let log = scrape::collect_season(&source, "New York Rangers", None, ScheduleFilter::default(), 2, None).unwrap();
    assert_eq!(log.team_id, "3");
    assert_eq!(log.season, "20192020");
    assert_eq!(log.rows.len(), 1);
    assert_eq!(log.rows[0].team, "NYR");
    assert!(!log.rows[0].win);
    assert_eq!(log.failed.len(), 1);
}

#[test]
fn season_log_matches_zero_padded_team_id() {
    let source = Recorded::new();
    let log = scrape::collect_season(&source, "03", None, ScheduleFilter::default(), 2, None).unwrap();
    assert_eq!(log.rows.len(), 1);
    assert_eq!(log.rows[0].team, "NYR");
}

#[test]
fn roster_is_split_by_position() {
    let source = Recorded::new();
    let r = scrape::collect_roster(&source, "BOS", None).unwrap();
    assert_eq!(r.all.len(), 3);
    assert_eq!(r.group(PositionGroup::Offense).len(), 1);
    assert_eq!(r.group(PositionGroup::Goalies)[0].person.full_name.as_deref(), Some("Tuukka Rask"));
}
