use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Error, Result, info,
    types::{CatalogEntry, Credentials, EntryKey, Track},
};

/// Free text song search against the streaming catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search_songs(
        &self,
        term: &str,
        limit: u32,
        credentials: &Credentials,
    ) -> Result<Vec<Track>>;
}

/// Maps catalog entries to playable tracks, remembering every match.
///
/// Tracks do not change identity, so the cache is never invalidated. The lock
/// is held across the search, which keeps a second lookup for the same entry
/// from racing the first one.
pub struct TrackResolver {
    search: Arc<dyn CatalogSearch>,
    cache: Mutex<HashMap<EntryKey, Track>>,
}

impl TrackResolver {
    pub fn new(search: Arc<dyn CatalogSearch>) -> Self {
        Self {
            search,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, entry: &CatalogEntry, credentials: &Credentials) -> Result<Track> {
        let mut cache = self.cache.lock().await;
        if let Some(track) = cache.get(&entry.key()) {
            return Ok(track.clone());
        }

        let term = entry.search_term();
        info!("Searching catalog for \"{}\"", term);
        let track = self
            .search
            .search_songs(&term, 1, credentials)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::TrackNotFound)?;

        Ok(cache.entry(entry.key()).or_insert(track).clone())
    }

    pub async fn cached(&self, entry: &CatalogEntry) -> Option<Track> {
        self.cache.lock().await.get(&entry.key()).cloned()
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
