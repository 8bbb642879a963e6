use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    Error,
    management::Catalog,
    player::PlaybackSession,
    types::{CatalogEntry, PlayOutcome},
    utils::BusyGuard,
};

pub const SCAN_PROMPT: &str = "Scan a card to start";
pub const NO_MATCH_MESSAGE: &str = "No song found";
pub const LOADING_MESSAGE: &str = "Loading song...";
pub const PLAYING_MESSAGE: &str = "Now playing";
pub const FAILED_MESSAGE: &str = "Playback failed";

/// What happened to one scanned code.
#[derive(Debug)]
pub enum ScanOutcome {
    /// A previous scan is still being handled; this one was dropped.
    Ignored,
    /// The code did not resolve to a catalog entry, either
    /// [`Error::Extraction`] or [`Error::CatalogMiss`].
    NoMatch(Error),
    /// The entry was handed to the session.
    Handled {
        entry: CatalogEntry,
        outcome: PlayOutcome,
    },
}

impl ScanOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ScanOutcome::Ignored => LOADING_MESSAGE,
            ScanOutcome::NoMatch(_) => NO_MATCH_MESSAGE,
            ScanOutcome::Handled { outcome, .. } => match outcome {
                PlayOutcome::Started => PLAYING_MESSAGE,
                PlayOutcome::Failed => FAILED_MESSAGE,
                PlayOutcome::Busy => LOADING_MESSAGE,
            },
        }
    }
}

/// Debounce gate between the code detector and the session.
///
/// Cameras report the same code many times per second. While one scan is
/// being handled every further scan is dropped, so at most one play sequence
/// is started from here at a time.
pub struct Scanner {
    catalog: Arc<Catalog>,
    session: Arc<PlaybackSession>,
    handling: AtomicBool,
}

impl Scanner {
    pub fn new(catalog: Arc<Catalog>, session: Arc<PlaybackSession>) -> Self {
        Self {
            catalog,
            session,
            handling: AtomicBool::new(false),
        }
    }

    pub fn is_handling(&self) -> bool {
        self.handling.load(Ordering::Acquire)
    }

    pub async fn handle_scan(&self, code: &str) -> ScanOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.handling) else {
            return ScanOutcome::Ignored;
        };

        match self.catalog.resolve_code(code).cloned() {
            Ok(entry) => {
                let outcome = self.session.play(entry.clone()).await;
                ScanOutcome::Handled { entry, outcome }
            }
            Err(e) => {
                self.session.report_miss(&e);
                ScanOutcome::NoMatch(e)
            }
        }
    }
}
