// tests/teams.rs
use nhl_scrape::data::DataSet;
use nhl_scrape::error::FeedError;
use nhl_scrape::specs::teams::{self, TEAMS};

#[test]
fn ids_pass_through_and_names_resolve() {
    assert_eq!(teams::resolve_team_id("6").unwrap(), "6");
    assert_eq!(teams::resolve_team_id("bos").unwrap(), "6");
    assert_eq!(teams::resolve_team_id(" Boston Bruins ").unwrap(), "6");
    assert_eq!(teams::resolve_team_id("NYR").unwrap(), "3");
}

#[test]
fn unknown_team_is_an_error() {
    assert!(matches!(teams::resolve_team_id("Hamilton Tigers"), Err(FeedError::UnknownTeam(_))));
    assert!(teams::resolve_team_id("").is_err());
}

#[test]
fn team_table_is_unique() {
    let list = teams::list_teams();
    assert_eq!(list.len(), TEAMS.len());
    for (i, (id, _, abbrev)) in list.iter().enumerate() {
        assert!(list[i + 1..].iter().all(|(other, _, a)| other != id && a != abbrev));
    }

    let ds = DataSet::from_records(TEAMS);
    assert_eq!(ds.headers.as_deref().unwrap(), ["id", "team", "abbrev"]);
    assert_eq!(ds.len(), TEAMS.len());
}
