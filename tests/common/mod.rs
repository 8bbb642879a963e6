#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use musicard::{
    Error, Result,
    management::{Authorization, CatalogSearch, KeyValueStore, TokenManager, UserTokenProvider},
    player::Player,
    types::{AuthorizationStatus, CatalogEntry, Category, Credentials, PlaybackStatus, Track},
};

pub fn entry(id: u32, category: Category, artist: &str, title: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        category,
        artist: artist.to_string(),
        title: title.to_string(),
    }
}

pub fn track(id: &str, title: &str, seconds: u64) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: None,
        duration: Some(Duration::from_secs(seconds)),
        url: None,
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        developer_token: "dev".to_string(),
        user_token: "user".to_string(),
    }
}

/// Catalog search returning canned tracks per query.
#[derive(Default)]
pub struct FakeSearch {
    pub results: HashMap<String, Vec<Track>>,
    pub calls: AtomicUsize,
    pub terms: std::sync::Mutex<Vec<String>>,
    pub fail_unauthorized: bool,
    pub delay: Duration,
}

impl FakeSearch {
    pub fn with(term: &str, tracks: Vec<Track>) -> Self {
        let mut results = HashMap::new();
        results.insert(term.to_string(), tracks);
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSearch for FakeSearch {
    async fn search_songs(
        &self,
        term: &str,
        limit: u32,
        _credentials: &Credentials,
    ) -> Result<Vec<Track>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.terms.lock().unwrap().push(term.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_unauthorized {
            return Err(Error::Unauthorized);
        }
        Ok(self
            .results
            .get(term)
            .map(|tracks| tracks.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

/// Permission with a fixed current status and a fixed answer to `request`.
pub struct FakeAuthorization {
    pub current: std::sync::Mutex<AuthorizationStatus>,
    pub answer: AuthorizationStatus,
    pub requests: AtomicUsize,
}

impl FakeAuthorization {
    pub fn new(current: AuthorizationStatus, answer: AuthorizationStatus) -> Self {
        Self {
            current: std::sync::Mutex::new(current),
            answer,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn authorized() -> Self {
        Self::new(AuthorizationStatus::Authorized, AuthorizationStatus::Authorized)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authorization for FakeAuthorization {
    async fn status(&self) -> AuthorizationStatus {
        *self.current.lock().unwrap()
    }

    async fn request(&self) -> AuthorizationStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.current.lock().unwrap() = self.answer;
        self.answer
    }
}

/// User token provider handing out numbered tokens after an optional delay.
#[derive(Default)]
pub struct FakeProvider {
    pub calls: AtomicUsize,
    pub delay: Duration,
    pub fail: bool,
}

impl FakeProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserTokenProvider for FakeProvider {
    async fn fetch_user_token(&self, developer_token: &str) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(Error::UserTokenFetchFailed("network down".to_string()));
        }
        Ok(format!("user-{}-for-{}", n, developer_token))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Player recording every command it receives.
pub struct FakePlayer {
    pub commands: std::sync::Mutex<Vec<String>>,
    pub status: std::sync::Mutex<PlaybackStatus>,
    pub position: std::sync::Mutex<Duration>,
    pub duration: std::sync::Mutex<Option<Duration>>,
    pub fail_play: bool,
    pub fail_transport: bool,
}

impl Default for FakePlayer {
    fn default() -> Self {
        Self {
            commands: std::sync::Mutex::new(Vec::new()),
            status: std::sync::Mutex::new(PlaybackStatus::Stopped),
            position: std::sync::Mutex::new(Duration::ZERO),
            duration: std::sync::Mutex::new(None),
            fail_play: false,
            fail_transport: false,
        }
    }
}

impl FakePlayer {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }

    fn transport(&self, command: &str) -> Result<()> {
        self.record(command.to_string());
        if self.fail_transport {
            Err(Error::PlayerCommand(format!("{} failed", command)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Player for FakePlayer {
    async fn set_queue(&self, tracks: Vec<Track>) -> Result<()> {
        let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        self.record(format!("queue:{}", ids.join(",")));
        *self.duration.lock().unwrap() = tracks.first().and_then(|t| t.duration);
        Ok(())
    }

    async fn prepare_to_play(&self) -> Result<()> {
        self.record("prepare".to_string());
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        self.record("play".to_string());
        if self.fail_play {
            return Err(Error::PlayerCommand("play failed".to_string()));
        }
        *self.status.lock().unwrap() = PlaybackStatus::Playing;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.transport("pause")?;
        *self.status.lock().unwrap() = PlaybackStatus::Paused;
        Ok(())
    }

    async fn seek(&self, position: Duration) -> Result<()> {
        self.record(format!("seek:{}", position.as_secs()));
        *self.position.lock().unwrap() = position;
        Ok(())
    }

    async fn skip_to_previous(&self) -> Result<()> {
        self.transport("previous")
    }

    async fn status(&self) -> PlaybackStatus {
        *self.status.lock().unwrap()
    }

    async fn position(&self) -> Duration {
        *self.position.lock().unwrap()
    }

    async fn current_duration(&self) -> Option<Duration> {
        *self.duration.lock().unwrap()
    }
}

pub fn token_manager(
    developer_token: Option<&str>,
    permission: Arc<FakeAuthorization>,
    provider: Arc<FakeProvider>,
    store: Arc<MemoryStore>,
) -> TokenManager {
    let developer_token = developer_token.map(str::to_string);
    TokenManager::new(move || developer_token.clone(), permission, provider, store)
}
