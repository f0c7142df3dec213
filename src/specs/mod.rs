// src/specs/mod.rs
//! # Feed *specs*
//!
//! One module per stats-API endpoint. Each spec knows where the data lives in
//! the JSON document and how to read it tolerantly; nothing here decides when
//! to fetch, how to combine games, or what to export.
//!
//! ## What lives here
//! - **Schemas** for the parts of each document we read, every leaf optional
//!   and deserialized through `core::lenient` so one malformed field becomes
//!   `None` instead of failing the document.
//! - **Endpoint paths** (`endpoint(..)`) and thin `fetch(..)` helpers over
//!   `core::net::HttpClient`.
//! - **Offline parsing** (`parse_doc(..)`) so fixtures can be tested without
//!   the network.
//!
//! ## What does **not** live here
//! - Event classification and table building: that is `game`.
//! - Batching, pacing, worker pools: that is `scrape`.
//!
//! ## Current specs
//! - `live_feed` – `/game/{id}/feed/live`, the per-game event log.
//! - `roster`    – `/teams/{id}/roster`, partitioned by position group.
//! - `schedule`  – `/schedule?season=S&teamId=T`, flattened to games.
//! - `seasons`   – `/seasons/current`.
//! - `teams`     – static name/abbreviation/id table (no request).
pub mod live_feed;
pub mod roster;
pub mod schedule;
pub mod seasons;
pub mod teams;
