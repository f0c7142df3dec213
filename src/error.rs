// src/error.rs

/// Errors surfaced by the feed client and the game transformation.
///
/// Missing leaf fields inside a play are *not* errors: they come through as `None`.
/// Only structural problems (no boxscore, a third team in a two-team game) end up here.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unprocessable game document: {0}")]
    Unprocessable(String),

    #[error("Team {code:?} is neither home ({home}) nor away ({away})")]
    UnresolvableTeam {
        code: String,
        home: String,
        away: String,
    },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

impl FeedError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }

    pub fn unknown_team(name: impl Into<String>) -> Self {
        Self::UnknownTeam(name.into())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
