// src/specs/roster.rs
use serde::{Deserialize, Serialize};

use crate::core::lenient;
use crate::core::net::HttpClient;
use crate::data::Tabular;
use crate::error::Result;

#[derive(Clone, Debug, Default, Deserialize)]
struct RosterResponse {
    #[serde(default)]
    roster: Vec<RosterEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(default)]
    pub person: RosterPerson,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub position: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPerson {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Position {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub code: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionGroup {
    Offense,
    Defense,
    Goalies,
}

impl PositionGroup {
    /// L/C/R forwards, D defense, G goalies. Anything else has no group.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "L" | "C" | "R" => Some(PositionGroup::Offense),
            "D" => Some(PositionGroup::Defense),
            "G" => Some(PositionGroup::Goalies),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offense" | "forwards" | "f" => Some(PositionGroup::Offense),
            "defense" | "d" => Some(PositionGroup::Defense),
            "goalies" | "goalie" | "g" => Some(PositionGroup::Goalies),
            _ => None,
        }
    }
}

impl RosterEntry {
    pub fn group(&self) -> Option<PositionGroup> {
        self.position.code.as_deref().and_then(PositionGroup::from_code)
    }
}

impl Tabular for RosterEntry {
    const HEADERS: &'static [&'static str] = &["name", "id", "number", "position"];

    fn to_row(&self) -> Vec<String> {
        row![self.person.full_name, self.person.id, self.jersey_number, self.position.code]
    }
}

/// A team roster split by position group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    pub all: Vec<RosterEntry>,
    pub offense: Vec<RosterEntry>,
    pub defense: Vec<RosterEntry>,
    pub goalies: Vec<RosterEntry>,
}

impl Roster {
    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        let mut roster = Roster::default();
        for e in &entries {
            match e.group() {
                Some(PositionGroup::Offense) => roster.offense.push(e.clone()),
                Some(PositionGroup::Defense) => roster.defense.push(e.clone()),
                Some(PositionGroup::Goalies) => roster.goalies.push(e.clone()),
                None => {}
            }
        }
        roster.all = entries;
        roster
    }

    pub fn group(&self, g: PositionGroup) -> &[RosterEntry] {
        match g {
            PositionGroup::Offense => &self.offense,
            PositionGroup::Defense => &self.defense,
            PositionGroup::Goalies => &self.goalies,
        }
    }
}

pub fn endpoint(team_id: &str, season: Option<&str>) -> String {
    let mut path = format!("/teams/{}/roster", team_id.trim());
    if let Some(season) = season {
        path.push_str(&format!("?season={}", season.trim()));
    }
    path
}

pub fn fetch(http: &HttpClient, team_id: &str, season: Option<&str>) -> Result<Vec<RosterEntry>> {
    let resp: RosterResponse = http.get_json(&endpoint(team_id, season))?;
    logd!("Roster: team {} -> {} players", team_id, resp.roster.len());
    Ok(resp.roster)
}

pub fn parse_doc(text: &str) -> Result<Vec<RosterEntry>> {
    let resp: RosterResponse = serde_json::from_str(text)?;
    Ok(resp.roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"roster": [
        {"person": {"id": 8471214, "fullName": "Alex Ovechkin"}, "jerseyNumber": "8", "position": {"code": "L"}},
        {"person": {"id": 8474590, "fullName": "John Carlson"}, "jerseyNumber": "74", "position": {"code": "D"}},
        {"person": {"id": 8471679, "fullName": "Braden Holtby"}, "jerseyNumber": "70", "position": {"code": "G"}},
        {"person": {"id": 8475744, "fullName": "Evgeny Kuznetsov"}, "jerseyNumber": "92", "position": {"code": "C"}},
        {"person": {"id": 1, "fullName": "Mystery Man"}, "position": {"code": "X"}}
    ]}"#;

    #[test]
    fn partitions_by_position_code() {
        let roster = Roster::from_entries(parse_doc(DOC).unwrap());
        assert_eq!(roster.all.len(), 5);
        assert_eq!(roster.offense.len(), 2);
        assert_eq!(roster.defense.len(), 1);
        assert_eq!(roster.goalies.len(), 1);
        assert_eq!(roster.goalies[0].person.full_name.as_deref(), Some("Braden Holtby"));
    }

    #[test]
    fn row_leaves_missing_number_empty() {
        let entries = parse_doc(DOC).unwrap();
        assert_eq!(entries[4].to_row(), vec!["Mystery Man", "1", "", "X"]);
    }

    #[test]
    fn endpoint_adds_season_query() {
        assert_eq!(endpoint("6", None), "/teams/6/roster");
        assert_eq!(
            endpoint("6", Some("20192020")),
            "/teams/6/roster?season=20192020"
        );
    }
}
