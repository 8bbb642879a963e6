use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    Error, Result, config,
    management::CatalogSearch,
    types::{Credentials, SearchResponse, Track},
    warning,
};

const MAX_ATTEMPTS: u32 = 3;

/// Apple Music catalog search over the REST API.
pub struct AppleMusicCatalog {
    client: Client,
    api_url: String,
    storefront: String,
}

impl AppleMusicCatalog {
    pub fn new(api_url: impl Into<String>, storefront: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            storefront: storefront.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::apple_music_api_url(), config::storefront())
    }

    fn search_url(&self) -> String {
        format!(
            "{uri}/catalog/{storefront}/search",
            uri = self.api_url,
            storefront = self.storefront
        )
    }
}

#[async_trait]
impl CatalogSearch for AppleMusicCatalog {
    /// Searches songs matching `term`.
    ///
    /// 502 Bad Gateway answers are retried after a short delay, up to three
    /// attempts. 401 and 403 map to [`Error::Unauthorized`] so callers can drop
    /// a stale user token.
    async fn search_songs(
        &self,
        term: &str,
        limit: u32,
        credentials: &Credentials,
    ) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = self
                .client
                .get(self.search_url())
                .query(&[("term", term), ("types", "songs"), ("limit", limit.as_str())])
                .bearer_auth(&credentials.developer_token)
                .header("Music-User-Token", &credentials.user_token)
                .send()
                .await?;

            let response = match response.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => match err.status() {
                    Some(StatusCode::BAD_GATEWAY) if attempt < MAX_ATTEMPTS => {
                        warning!("Catalog answered 502, retrying ({}/{})", attempt, MAX_ATTEMPTS);
                        sleep(Duration::from_secs(2)).await;
                        continue;
                    }
                    Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                        return Err(Error::Unauthorized);
                    }
                    _ => return Err(err.into()),
                },
            };

            let res = response.json::<SearchResponse>().await?;
            return Ok(res
                .results
                .songs
                .map(|page| page.data.into_iter().map(Track::from).collect())
                .unwrap_or_default());
        }
    }
}
