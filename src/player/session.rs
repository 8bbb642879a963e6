use std::{
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::{
    Error, Result, config, info,
    management::{Authorization, TokenManager, TrackResolver, ensure_authorized},
    player::Player,
    types::{
        CatalogEntry, Credentials, Phase, PlayOutcome, PlaybackStatus, SessionState, Track,
    },
    utils::{self, BusyGuard},
    warning,
};

const LOADING_MESSAGE: &str = "Loading...";

/// Tuning knobs of the playback session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Fraction of the track at which playback starts, to land past the intro.
    pub start_offset_ratio: f64,
    /// Period of the player synchronization tick.
    pub sync_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_offset_ratio: 0.4,
            sync_interval: Duration::from_millis(500),
        }
    }
}

impl SessionConfig {
    pub fn from_config() -> Self {
        Self {
            start_offset_ratio: config::start_offset_ratio(),
            sync_interval: config::sync_interval(),
        }
    }
}

/// Owns the interaction with the external player.
///
/// Session state is published through a watch channel: every mutation goes
/// through `send_modify`, so writers never interleave and subscribers always
/// see a consistent snapshot. Commands write phase, entry and status; only
/// [`PlaybackSession::sync_once`] writes `is_playing`, `position` and `duration`.
pub struct PlaybackSession {
    player: Arc<dyn Player>,
    authorization: Arc<dyn Authorization>,
    tokens: Arc<TokenManager>,
    resolver: Arc<TrackResolver>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    in_flight: AtomicBool,
}

impl PlaybackSession {
    pub fn new(
        player: Arc<dyn Player>,
        authorization: Arc<dyn Authorization>,
        tokens: Arc<TokenManager>,
        resolver: Arc<TrackResolver>,
        config: SessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            player,
            authorization,
            tokens,
            resolver,
            config,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn formatted_position(&self) -> String {
        utils::format_time(self.state.borrow().position)
    }

    pub fn formatted_duration(&self) -> String {
        utils::format_time(self.state.borrow().duration)
    }

    /// Resolves `entry` and starts playing it.
    ///
    /// Returns [`PlayOutcome::Busy`] without touching anything while another
    /// play sequence is in flight. Failures never escape: they move the session
    /// to [`Phase::Failed`] with a status message and leave `current_entry`,
    /// and whatever the player was doing, as it was.
    pub async fn play(&self, entry: CatalogEntry) -> PlayOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.in_flight) else {
            warning!("Playback already starting, ignoring {} - {}", entry.artist, entry.title);
            return PlayOutcome::Busy;
        };

        info!("Starting playback for: {} - {}", entry.artist, entry.title);
        self.state.send_modify(|s| {
            s.phase = Phase::Authorizing;
            s.status_message = LOADING_MESSAGE.to_string();
        });

        match self.start(&entry).await {
            Ok(track) => {
                info!("Found song: {} - {}", track.artist, track.title);
                self.state.send_modify(|s| {
                    s.phase = Phase::Playing;
                    s.current_entry = Some(entry);
                    s.status_message.clear();
                });
                self.sync_once().await;
                PlayOutcome::Started
            }
            Err(e) => {
                warning!("Playback failed: {}", e);
                if e.is_auth_error() {
                    self.tokens.invalidate_user_token().await;
                }
                self.state.send_modify(|s| {
                    s.phase = Phase::Failed;
                    s.status_message = e.status_message();
                });
                PlayOutcome::Failed
            }
        }
    }

    /// Settles music authorization and both tokens ahead of the first scan.
    pub async fn prepare(&self) -> Result<()> {
        self.authorize().await.map(|_| ())
    }

    async fn authorize(&self) -> Result<Credentials> {
        let (authorized, credentials) = tokio::join!(
            ensure_authorized(self.authorization.as_ref(), Error::AuthorizationDenied),
            self.tokens.ensure_tokens()
        );
        authorized?;
        credentials
    }

    async fn start(&self, entry: &CatalogEntry) -> Result<Track> {
        let credentials = self.authorize().await?;

        self.set_phase(Phase::Resolving);
        let track = self.resolver.resolve(entry, &credentials).await?;

        self.set_phase(Phase::Queueing);
        self.queue_and_play(&track).await?;
        Ok(track)
    }

    async fn queue_and_play(&self, track: &Track) -> Result<()> {
        self.player.set_queue(vec![track.clone()]).await?;
        self.player.prepare_to_play().await?;

        if let Some(duration) = track.duration {
            let offset = utils::start_offset(duration, self.config.start_offset_ratio);
            self.player.seek(offset).await?;
        }

        self.player.play().await
    }

    /// Publishes why a scanned code matched no song.
    ///
    /// Only the status message changes; phase and the playing entry stay.
    pub fn report_miss(&self, error: &Error) {
        self.state
            .send_modify(|s| s.status_message = error.status_message());
    }

    fn set_phase(&self, phase: Phase) {
        self.state.send_modify(|s| s.phase = phase);
    }

    /// Pauses when the player is playing, plays otherwise.
    pub async fn toggle_play_pause(&self) {
        let playing = self.player.status().await == PlaybackStatus::Playing;
        let result = if playing {
            self.player.pause().await
        } else {
            self.player.play().await
        };

        match result {
            Ok(()) => self.state.send_modify(|s| {
                if s.current_entry.is_some() {
                    s.phase = if playing { Phase::Paused } else { Phase::Playing };
                }
            }),
            Err(e) => warning!("Toggle play/pause error: {}", e),
        }
    }

    pub async fn seek(&self, position: Duration) {
        if let Err(e) = self.player.seek(position).await {
            warning!("Seek error: {}", e);
        }
    }

    pub async fn previous(&self) {
        if let Err(e) = self.player.skip_to_previous().await {
            warning!("Skip previous error: {}", e);
        }
    }

    /// Pulls position, duration and playing flag from the player.
    pub async fn sync_once(&self) {
        let is_playing = self.player.status().await == PlaybackStatus::Playing;
        let position = self.player.position().await;
        let duration = self.player.current_duration().await;

        self.state.send_modify(|s| {
            s.is_playing = is_playing;
            s.position = position;
            if let Some(duration) = duration {
                s.duration = duration;
            }
        });
    }

    /// Starts the periodic synchronization tick.
    ///
    /// The task only holds a weak reference and ends once the session is
    /// dropped; abort the handle to stop it earlier.
    pub fn spawn_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let session: Weak<Self> = Arc::downgrade(self);
        let period = self.config.sync_interval;

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(session) = session.upgrade() else {
                    break;
                };
                session.sync_once().await;
            }
        })
    }
}
