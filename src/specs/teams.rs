// src/specs/teams.rs
//! Static team table.
//!
//! Team ids are fixed by the league API, so there is nothing to fetch: the
//! table below is the whole source of truth. Lookup is case-insensitive by
//! full name or three-letter abbreviation.

use crate::data::Tabular;
use crate::error::{FeedError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamEntry {
    pub id: u32,
    pub name: &'static str,
    pub abbrev: &'static str,
}

const fn team(id: u32, name: &'static str, abbrev: &'static str) -> TeamEntry {
    TeamEntry { id, name, abbrev }
}

/// Active teams, sorted by id.
pub const TEAMS: &[TeamEntry] = &[
    team(1, "New Jersey Devils", "NJD"),
    team(2, "New York Islanders", "NYI"),
    team(3, "New York Rangers", "NYR"),
    team(4, "Philadelphia Flyers", "PHI"),
    team(5, "Pittsburgh Penguins", "PIT"),
    team(6, "Boston Bruins", "BOS"),
    team(7, "Buffalo Sabres", "BUF"),
    team(8, "Montreal Canadiens", "MTL"),
    team(9, "Ottawa Senators", "OTT"),
    team(10, "Toronto Maple Leafs", "TOR"),
    team(12, "Carolina Hurricanes", "CAR"),
    team(13, "Florida Panthers", "FLA"),
    team(14, "Tampa Bay Lightning", "TBL"),
    team(15, "Washington Capitals", "WSH"),
    team(16, "Chicago Blackhawks", "CHI"),
    team(17, "Detroit Red Wings", "DET"),
    team(18, "Nashville Predators", "NSH"),
    team(19, "St. Louis Blues", "STL"),
    team(20, "Calgary Flames", "CGY"),
    team(21, "Colorado Avalanche", "COL"),
    team(22, "Edmonton Oilers", "EDM"),
    team(23, "Vancouver Canucks", "VAN"),
    team(24, "Anaheim Ducks", "ANA"),
    team(25, "Dallas Stars", "DAL"),
    team(26, "Los Angeles Kings", "LAK"),
    team(28, "San Jose Sharks", "SJS"),
    team(29, "Columbus Blue Jackets", "CBJ"),
    team(30, "Minnesota Wild", "MIN"),
    team(52, "Winnipeg Jets", "WPG"),
    team(53, "Arizona Coyotes", "ARI"),
    team(54, "Vegas Golden Knights", "VGK"),
];

impl Tabular for TeamEntry {
    const HEADERS: &'static [&'static str] = &["id", "team", "abbrev"];

    fn to_row(&self) -> Vec<String> {
        row![self.id, self.name, self.abbrev]
    }
}

/// Find a team by full name or abbreviation, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> Option<&'static TeamEntry> {
    let key = name.trim();
    TEAMS
        .iter()
        .find(|t| t.abbrev.eq_ignore_ascii_case(key) || t.name.eq_ignore_ascii_case(key))
}

pub fn lookup_id(name: &str) -> Option<u32> {
    lookup(name).map(|t| t.id)
}

pub fn by_id(id: u32) -> Option<&'static TeamEntry> {
    TEAMS.iter().find(|t| t.id == id)
}

/// Numeric input passes through unchanged ("6" -> "6"); names and
/// abbreviations resolve through the table ("bos" -> "6").
pub fn resolve_team_id(input: &str) -> Result<String> {
    let s = input.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(s!(s));
    }
    lookup_id(s)
        .map(|id| id.to_string())
        .ok_or_else(|| FeedError::unknown_team(s))
}

/// `(id, name, abbrev)` for every team, sorted by id.
pub fn list_teams() -> Vec<(u32, &'static str, &'static str)> {
    TEAMS.iter().map(|t| (t.id, t.name, t.abbrev)).collect()
}
