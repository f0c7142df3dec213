// src/game/context.rs
//! Game-level facts derived once per document: the two teams, final score,
//! date and declared winner. Everything a row needs beyond its own play.

use chrono::NaiveDate;

use crate::core::lenient::parse_date;
use crate::error::{FeedError, Result};
use crate::specs::live_feed::{BoxscoreTeam, HomeAway, LinescoreTeam, RawGameDocument};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRef {
    /// triCode, e.g. "BOS".
    pub code: String,
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameContext {
    pub game_id: String,
    pub home: TeamRef,
    pub away: TeamRef,
    pub home_goals: u32,
    pub away_goals: u32,
    pub date: Option<NaiveDate>,
    pub winner: Side,
}

/// Home is declared the winner unless it scored strictly fewer goals.
/// Kept separate so the tie rule can change without touching extraction.
pub fn declare_winner(home_goals: u32, away_goals: u32) -> Side {
    if home_goals < away_goals { Side::Away } else { Side::Home }
}

impl GameContext {
    /// Fails with `Unprocessable` when the boxscore teams or linescore goals
    /// are missing, or both sides carry the same triCode.
    pub fn from_document(game_id: &str, doc: &RawGameDocument) -> Result<Self> {
        let teams = doc
            .boxscore_teams()
            .ok_or_else(|| FeedError::unprocessable("boxscore.teams missing"))?;
        let home = team_ref(teams, Side::Home)?;
        let away = team_ref(teams, Side::Away)?;
        if home.code.eq_ignore_ascii_case(&away.code) {
            return Err(FeedError::unprocessable(format!(
                "home and away are both {}",
                home.code
            )));
        }

        let line = doc
            .linescore_teams()
            .ok_or_else(|| FeedError::unprocessable("linescore.teams missing"))?;
        let home_goals = goals(line, Side::Home)?;
        let away_goals = goals(line, Side::Away)?;

        let date = doc
            .current_play()
            .and_then(|p| p.date_time())
            .and_then(parse_date);

        Ok(Self {
            game_id: s!(game_id.trim()),
            home,
            away,
            home_goals,
            away_goals,
            date,
            winner: declare_winner(home_goals, away_goals),
        })
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn winner_team(&self) -> &TeamRef {
        self.team(self.winner)
    }

    pub fn side_of(&self, code: &str) -> Option<Side> {
        let code = code.trim();
        if self.home.code.eq_ignore_ascii_case(code) {
            Some(Side::Home)
        } else if self.away.code.eq_ignore_ascii_case(code) {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// The opponent of `code`. A code that is neither side is a broken document.
    pub fn other_team(&self, code: &str) -> Result<&TeamRef> {
        self.teams_of(code).map(|(_, other)| other)
    }

    /// `code`'s own team and its opponent, with the canonical codes from the boxscore.
    pub fn teams_of(&self, code: &str) -> Result<(&TeamRef, &TeamRef)> {
        match self.side_of(code) {
            Some(side) => Ok((self.team(side), self.team(side.opposite()))),
            None => Err(FeedError::UnresolvableTeam {
                code: s!(code),
                home: self.home.code.clone(),
                away: self.away.code.clone(),
            }),
        }
    }
}

fn team_ref(teams: &HomeAway<BoxscoreTeam>, side: Side) -> Result<TeamRef> {
    let (label, team) = match side {
        Side::Home => ("home", teams.home.as_ref()),
        Side::Away => ("away", teams.away.as_ref()),
    };
    let team = team.ok_or_else(|| FeedError::unprocessable(format!("boxscore.teams.{label} missing")))?;
    let code = team
        .tri_code()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| FeedError::unprocessable(format!("{label} triCode missing")))?;
    let id = team
        .team_id()
        .ok_or_else(|| FeedError::unprocessable(format!("{label} team id missing")))?;
    Ok(TeamRef { code: s!(code), id })
}

fn goals(line: &HomeAway<LinescoreTeam>, side: Side) -> Result<u32> {
    let (label, team) = match side {
        Side::Home => ("home", line.home.as_ref()),
        Side::Away => ("away", line.away.as_ref()),
    };
    team.and_then(|t| t.goals)
        .ok_or_else(|| FeedError::unprocessable(format!("linescore.teams.{label}.goals missing")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::live_feed::parse_doc;

    fn doc(home_goals: &str, away_code: &str) -> RawGameDocument {
        let text = format!(
            r#"{{
            "boxscore": {{"teams": {{
                "home": {{"team": {{"id": 6, "triCode": "BOS"}}}},
                "away": {{"team": {{"id": 3, "triCode": "{away_code}"}}}}}}}},
            "linescore": {{"teams": {{"home": {{"goals": {home_goals}}}, "away": {{"goals": 2}}}}}},
            "plays": {{"allPlays": [], "currentPlay": {{"about": {{"dateTime": "2019-10-03T23:11:04Z"}}}}}}
        }}"#
        );
        parse_doc(&text).unwrap()
    }

    #[test]
    fn goals_come_from_each_side() {
        let ctx = GameContext::from_document("2019020010", &doc("3", "NYR")).unwrap();
        assert_eq!((ctx.home_goals, ctx.away_goals), (3, 2));
        assert_eq!(ctx.winner, Side::Home);
        assert_eq!(ctx.date, NaiveDate::from_ymd_opt(2019, 10, 3));
    }

    #[test]
    fn home_wins_ties() {
        assert_eq!(declare_winner(2, 2), Side::Home);
        assert_eq!(declare_winner(1, 2), Side::Away);
        assert_eq!(declare_winner(4, 2), Side::Home);
    }

    #[test]
    fn other_team_is_binary() {
        let ctx = GameContext::from_document("1", &doc("1", "NYR")).unwrap();
        assert_eq!(ctx.other_team("BOS").unwrap().code, "NYR");
        assert_eq!(ctx.other_team("nyr").unwrap().id, 6);
        assert!(matches!(ctx.other_team("TOR"), Err(FeedError::UnresolvableTeam { .. })));
    }

    #[test]
    fn teams_of_returns_canonical_codes() {
        let ctx = GameContext::from_document("1", &doc("1", "NYR")).unwrap();
        let (own, other) = ctx.teams_of(" bos ").unwrap();
        assert_eq!((own.code.as_str(), other.code.as_str()), ("BOS", "NYR"));
    }

    #[test]
    fn missing_structure_is_unprocessable() {
        let err = GameContext::from_document("1", &parse_doc(r#"{"plays": {"allPlays": []}}"#).unwrap());
        assert!(matches!(err, Err(FeedError::Unprocessable(_))));
        let same = GameContext::from_document("1", &doc("1", "BOS"));
        assert!(matches!(same, Err(FeedError::Unprocessable(_))));
    }
}
