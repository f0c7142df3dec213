// src/game/mod.rs
//! # Game transformation
//!
//! Turns one live-feed document into flat tables:
//!
//! ```text
//! RawEvent ─ classify ─┬─ participants ─┐
//!                      └─ coords ───────┴─ record ─ tables (categories, boxscore)
//! ```
//!
//! `Game` owns one document and its derived tables. The event table and the
//! shot chart are built lazily and memoised against a version counter; only
//! `refresh` / `replace_document` bump the version. A failed refresh leaves
//! the previous document and cache untouched.

pub mod classify;
pub mod context;
pub mod coords;
pub mod participants;
pub mod record;
pub mod tables;

use crate::error::{FeedError, Result};
use crate::source::FeedSource;
use crate::specs::live_feed::{RawEvent, RawGameDocument};

use self::context::GameContext;
use self::record::{EventRecord, ShotRecord};
use self::tables::{AggregateStatsRow, GameTables};

#[derive(Clone, Debug)]
struct Cached<T> {
    version: u64,
    value: T,
}

#[derive(Clone, Debug, Default)]
struct TableCache {
    events: Option<Cached<Vec<EventRecord>>>,
    shots: Option<Cached<Vec<ShotRecord>>>,
}

#[derive(Clone, Debug)]
pub struct Game {
    doc: RawGameDocument,
    ctx: GameContext,
    boxscore: Vec<AggregateStatsRow>,
    version: u64,
    cache: TableCache,
}

impl Game {
    /// Validate the document and derive the game context. Fails fast on a
    /// document without boxscore teams, linescore goals or a play list.
    pub fn from_document(game_id: &str, doc: RawGameDocument) -> Result<Self> {
        if doc.all_plays().is_none() {
            return Err(FeedError::unprocessable("plays.allPlays missing"));
        }
        let ctx = GameContext::from_document(game_id, &doc)?;
        let boxscore = tables::boxscore(&ctx, &doc);
        logd!("Game {}: {} vs {} ({}-{})", ctx.game_id, ctx.home.code, ctx.away.code, ctx.home_goals, ctx.away_goals);
        Ok(Self { doc, ctx, boxscore, version: 0, cache: TableCache::default() })
    }

    pub fn fetch<S: FeedSource + ?Sized>(source: &S, game_id: &str) -> Result<Self> {
        let doc = source.live_data(game_id)?;
        Self::from_document(game_id, doc)
    }

    /// Re-fetch the document and drop every memoised table.
    pub fn refresh<S: FeedSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let doc = source.live_data(&self.ctx.game_id)?;
        self.replace_document(doc)
    }

    pub fn replace_document(&mut self, doc: RawGameDocument) -> Result<()> {
        let fresh = Self::from_document(&self.ctx.game_id, doc)?;
        self.doc = fresh.doc;
        self.ctx = fresh.ctx;
        self.boxscore = fresh.boxscore;
        self.version += 1;
        self.cache = TableCache::default();
        logf!("Game {}: refreshed (version {})", self.ctx.game_id, self.version);
        Ok(())
    }

    pub fn game_id(&self) -> &str {
        &self.ctx.game_id
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn document(&self) -> &RawGameDocument {
        &self.doc
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn plays(&self) -> &[RawEvent] {
        self.doc.all_plays().unwrap_or(&[])
    }

    /// General event table, memoised until the next refresh.
    pub fn events(&mut self) -> Result<&[EventRecord]> {
        let version = self.version;
        let cached = match self.cache.events.take() {
            Some(c) if c.version == version => c,
            _ => Cached { version, value: record::build_event_records(self.plays(), &self.ctx)? },
        };
        Ok(&self.cache.events.insert(cached).value)
    }

    /// Shot chart (positions mirrored on even periods), memoised until the next refresh.
    pub fn shot_chart(&mut self) -> Result<&[ShotRecord]> {
        let version = self.version;
        let cached = match self.cache.shots.take() {
            Some(c) if c.version == version => c,
            _ => Cached { version, value: record::build_shot_records(self.plays(), &self.ctx)? },
        };
        Ok(&self.cache.shots.insert(cached).value)
    }

    pub fn boxscore(&self) -> &[AggregateStatsRow] {
        &self.boxscore
    }

    /// Every table of this game. Category tables are recomputed from the
    /// memoised event table on each call.
    pub fn tables(&mut self) -> Result<GameTables> {
        let events = self.events()?.to_vec();
        let shot_chart = self.shot_chart()?.to_vec();
        Ok(GameTables::new(events, shot_chart, self.boxscore.clone()))
    }
}
