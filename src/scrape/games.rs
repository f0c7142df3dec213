// src/scrape/games.rs
use std::{
    thread,
    time::Duration,
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
};

use crate::{
    config::consts::{JITTER_MS, REQUEST_PAUSE_MS},
    error::Result,
    game::{Game, tables::GameTables},
    progress::Progress,
    source::FeedSource,
    specs::live_feed::RawGameDocument,
};

/// Tables of every game that made it, in request order, plus the ones that did not.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    pub games: Vec<(String, GameTables)>,
    pub failed: Vec<(String, String)>,
}

pub fn collect_game<S: FeedSource + ?Sized>(source: &S, game_id: &str) -> Result<GameTables> {
    Game::fetch(source, game_id)?.tables()
}

/// Fetch many games in parallel; each document is transformed on the calling
/// thread as it arrives. A failing game is reported and skipped.
pub fn collect_games<S: FeedSource + Sync + ?Sized>(
    source: &S,
    ids: &[String],
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Batch {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }

    // Concurrency
    type FetchOk = (usize, RawGameDocument);
    type FetchErr = (usize, String);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<std::result::Result<FetchOk, FetchErr>>();
    let workers = workers.min(ids.len()).max(1);

    let mut slots: Vec<Option<GameTables>> = vec![None; ids.len()];
    let mut failed: Vec<(usize, String)> = Vec::new();

    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();

            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let result = match source.live_data(&ids[i]) {
                        Ok(doc) => Ok((i, doc)),
                        Err(e) => Err((i, e.to_string())),
                    };
                    let _ = tx.send(result);
                    let jitter = (i as u64 * 7) % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        // Aggregate results
        for msg in res_rx.iter() {
            let outcome = msg.and_then(|(i, doc)| {
                Game::from_document(&ids[i], doc)
                    .and_then(|mut g| g.tables())
                    .map(|t| (i, t))
                    .map_err(|e| (i, e.to_string()))
            });
            match outcome {
                Ok((i, tables)) => {
                    slots[i] = Some(tables);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&ids[i]);
                    }
                }
                Err((i, msg)) => {
                    loge!("Game {}: {}", ids[i], msg);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&ids[i], &msg);
                    }
                    failed.push((i, msg));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    failed.sort_by_key(|(i, _)| *i);
    let batch = Batch {
        games: ids
            .iter()
            .cloned()
            .zip(slots)
            .filter_map(|(id, t)| t.map(|t| (id, t)))
            .collect(),
        failed: failed.into_iter().map(|(i, msg)| (ids[i].clone(), msg)).collect(),
    };
    logf!("Collected {} games ({} failed)", batch.games.len(), batch.failed.len());
    batch
}
