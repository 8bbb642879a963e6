use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Error, Result, info,
    player::Player,
    types::{PlaybackStatus, Track},
};

#[derive(Default)]
struct Timeline {
    queue: Vec<Track>,
    index: usize,
    offset: Duration,
    started_at: Option<Instant>,
    prepared: bool,
}

impl Timeline {
    fn current(&self) -> Option<&Track> {
        self.queue.get(self.index)
    }

    fn position(&self) -> Duration {
        let elapsed = self.started_at.map(|at| at.elapsed()).unwrap_or_default();
        let position = self.offset + elapsed;
        match self.current().and_then(|t| t.duration) {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn finished(&self) -> bool {
        self.current()
            .and_then(|t| t.duration)
            .is_some_and(|duration| self.position() >= duration)
    }

    fn freeze(&mut self) {
        self.offset = self.position();
        self.started_at = None;
    }
}

/// Headless player that tracks the queue and a wall-clock timeline.
///
/// It produces no audio; position advances while playing and stops at the end
/// of the current track. Useful on hosts without a platform player and as the
/// player behind the CLI.
#[derive(Default)]
pub struct TimelinePlayer {
    inner: Mutex<Timeline>,
}

impl TimelinePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.inner.lock().await.current().cloned()
    }
}

#[async_trait]
impl Player for TimelinePlayer {
    async fn set_queue(&self, tracks: Vec<Track>) -> Result<()> {
        if tracks.is_empty() {
            return Err(Error::PlayerCommand("empty queue".to_string()));
        }
        let mut timeline = self.inner.lock().await;
        *timeline = Timeline {
            queue: tracks,
            ..Timeline::default()
        };
        Ok(())
    }

    async fn prepare_to_play(&self) -> Result<()> {
        let mut timeline = self.inner.lock().await;
        if timeline.current().is_none() {
            return Err(Error::PlayerCommand("nothing queued".to_string()));
        }
        timeline.prepared = true;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut timeline = self.inner.lock().await;
        let Some(track) = timeline.current() else {
            return Err(Error::PlayerCommand("nothing queued".to_string()));
        };
        let title = format!("{} - {}", track.artist, track.title);
        if timeline.finished() {
            timeline.offset = Duration::ZERO;
            timeline.started_at = None;
        }
        if timeline.started_at.is_none() {
            timeline.started_at = Some(Instant::now());
            info!("Playing {}", title);
        }
        timeline.prepared = true;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.inner.lock().await.freeze();
        Ok(())
    }

    async fn seek(&self, position: Duration) -> Result<()> {
        let mut timeline = self.inner.lock().await;
        if timeline.current().is_none() {
            return Err(Error::PlayerCommand("nothing queued".to_string()));
        }
        timeline.offset = position;
        if timeline.started_at.is_some() {
            timeline.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn skip_to_previous(&self) -> Result<()> {
        let mut timeline = self.inner.lock().await;
        if timeline.current().is_none() {
            return Err(Error::PlayerCommand("nothing queued".to_string()));
        }
        // A single-entry queue restarts the current track.
        timeline.index = timeline.index.saturating_sub(1);
        timeline.offset = Duration::ZERO;
        if timeline.started_at.is_some() {
            timeline.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn status(&self) -> PlaybackStatus {
        let timeline = self.inner.lock().await;
        match (timeline.started_at, timeline.finished()) {
            (Some(_), false) => PlaybackStatus::Playing,
            (None, _) if timeline.prepared && !timeline.finished() => PlaybackStatus::Paused,
            _ => PlaybackStatus::Stopped,
        }
    }

    async fn position(&self) -> Duration {
        self.inner.lock().await.position()
    }

    async fn current_duration(&self) -> Option<Duration> {
        self.inner.lock().await.current().and_then(|t| t.duration)
    }
}
