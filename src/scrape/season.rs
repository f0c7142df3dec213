// src/scrape/season.rs
use crate::{
    error::{FeedError, Result},
    game::tables::AggregateStatsRow,
    progress::Progress,
    source::FeedSource,
    specs::{roster::Roster, teams},
};

use super::games::collect_games;

/// Which games of a schedule count. Regular-season games always do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub include_preseason: bool,
    pub include_postseason: bool,
}

/// One team's boxscore rows over a season.
#[derive(Clone, Debug, Default)]
pub struct SeasonLog {
    pub team_id: String,
    pub season: String,
    pub rows: Vec<AggregateStatsRow>,
    pub failed: Vec<(String, String)>,
}

fn season_or_current<S: FeedSource + ?Sized>(source: &S, season: Option<&str>) -> Result<String> {
    match season.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(s!(s)),
        None => source.current_season(),
    }
}

/// Completed games of `team` in `season` (current season when `None`), in schedule order.
pub fn season_game_ids<S: FeedSource + ?Sized>(
    source: &S,
    team: &str,
    season: Option<&str>,
    filter: ScheduleFilter,
) -> Result<Vec<String>> {
    let team_id = teams::resolve_team_id(team)?;
    let season = season_or_current(source, season)?;
    let schedule = source.schedule(&team_id, &season)?;

    let mut ids: Vec<String> = Vec::new();
    for g in &schedule {
        if !g.is_final() {
            continue;
        }
        if g.is_preseason() && !filter.include_preseason {
            continue;
        }
        if g.is_postseason() && !filter.include_postseason {
            continue;
        }
        if let Some(pk) = g.game_pk {
            let id = pk.to_string();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    logd!("Season {} team {}: {} of {} scheduled games kept", season, team_id, ids.len(), schedule.len());
    Ok(ids)
}

/// Fetch every kept game of the season and keep `team`'s boxscore row from each.
pub fn collect_season<S: FeedSource + Sync + ?Sized>(
    source: &S,
    team: &str,
    season: Option<&str>,
    filter: ScheduleFilter,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Result<SeasonLog> {
    let team_id = teams::resolve_team_id(team)?;
    let team_num: u64 = team_id.parse().map_err(|_| FeedError::unknown_team(&team_id))?;
    let season = season_or_current(source, season)?;
    let ids = season_game_ids(source, &team_id, Some(&season), filter)?;

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Season {season}: {} games for team {team_id}", ids.len()));
    }
    let batch = collect_games(source, &ids, workers, progress);

    let rows = batch
        .games
        .into_iter()
        .flat_map(|(_, t)| t.boxscore)
        .filter(|r| r.team_id == team_num)
        .collect();

    Ok(SeasonLog { team_id, season, rows, failed: batch.failed })
}

/// Roster of `team` for `season` (current season when `None`).
pub fn collect_roster<S: FeedSource + ?Sized>(source: &S, team: &str, season: Option<&str>) -> Result<Roster> {
    let team_id = teams::resolve_team_id(team)?;
    let season = season_or_current(source, season)?;
    let entries = source.team_roster(&team_id, Some(&season))?;
    Ok(Roster::from_entries(entries))
}
