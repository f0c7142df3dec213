// src/specs/seasons.rs
use serde::Deserialize;

use crate::core::lenient;
use crate::core::net::HttpClient;
use crate::error::{FeedError, Result};

pub const ENDPOINT: &str = "/seasons/current";

#[derive(Clone, Debug, Default, Deserialize)]
struct SeasonsResponse {
    #[serde(default)]
    seasons: Vec<Season>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Season {
    #[serde(default, deserialize_with = "lenient::opt")]
    season_id: Option<String>,
}

/// Season id of the running season, e.g. "20192020".
pub fn fetch_current(http: &HttpClient) -> Result<String> {
    let body = http.get_text(ENDPOINT)?;
    parse_current(&body)
}

pub fn parse_current(text: &str) -> Result<String> {
    let resp: SeasonsResponse = serde_json::from_str(text)?;
    resp.seasons
        .into_iter()
        .next()
        .and_then(|s| s.season_id)
        .ok_or_else(|| FeedError::unprocessable("seasons[0].seasonId missing"))
}
