//! Playback side of the crate.
//!
//! [`Player`] is the seam to whatever actually produces sound. The
//! [`PlaybackSession`] drives it and mirrors its state for the presentation
//! layer; [`TimelinePlayer`] is the headless implementation the CLI uses when
//! no platform player is attached.

mod session;
mod timeline;

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Result,
    types::{PlaybackStatus, Track},
};

pub use session::{PlaybackSession, SessionConfig};
pub use timeline::TimelinePlayer;

/// External player capabilities the session relies on.
#[async_trait]
pub trait Player: Send + Sync {
    /// Replaces the queue with `tracks`, current entry first.
    async fn set_queue(&self, tracks: Vec<Track>) -> Result<()>;
    async fn prepare_to_play(&self) -> Result<()>;
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    /// Moves to an absolute position in the current entry.
    async fn seek(&self, position: Duration) -> Result<()>;
    async fn skip_to_previous(&self) -> Result<()>;
    async fn status(&self) -> PlaybackStatus;
    async fn position(&self) -> Duration;
    /// Duration of the current queue entry, when the player knows it.
    async fn current_duration(&self) -> Option<Duration>;
}
