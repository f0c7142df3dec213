// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod game;
pub mod progress;
pub mod scrape;
pub mod source;
pub mod specs;

pub use error::{FeedError, Result};
pub use game::Game;
pub use source::{FeedSource, NhlApi};
