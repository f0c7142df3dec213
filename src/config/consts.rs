// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://statsapi.web.nhl.com/api/v1";
pub const USER_AGENT: &str = "nhl_scrape/0.1";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Local store (logs only; nothing is persisted between runs)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_GAMES_SUBDIR: &str = "games";
pub const DEFAULT_SEASONS_SUBDIR: &str = "seasons";
pub const DEFAULT_ROSTERS_SUBDIR: &str = "rosters";
pub const DEFAULT_FILE: &str = "all";

// Concurrency (batch collection only; a single game is processed on one thread)
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Env overrides
pub const ENV_BASE_URL: &str = "NHL_SCRAPE_BASE_URL";
pub const ENV_WORKERS: &str = "NHL_SCRAPE_WORKERS";
