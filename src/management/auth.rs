use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Error, Result, config, info,
    management::KeyValueStore,
    types::{AuthorizationStatus, Credentials},
    warning,
};

/// A permission the user grants once, like music library or cloud service access.
#[async_trait]
pub trait Authorization: Send + Sync {
    /// Current decision without prompting.
    async fn status(&self) -> AuthorizationStatus;

    /// Asks the user and returns the new decision.
    async fn request(&self) -> AuthorizationStatus;
}

/// Exchanges a developer token for a per-user token.
#[async_trait]
pub trait UserTokenProvider: Send + Sync {
    async fn fetch_user_token(&self, developer_token: &str) -> Result<String>;
}

/// Resolves a permission, prompting only when the user has not decided yet.
pub async fn ensure_authorized(authorization: &dyn Authorization, denied: Error) -> Result<()> {
    match authorization.status().await {
        AuthorizationStatus::Authorized => Ok(()),
        AuthorizationStatus::NotDetermined => match authorization.request().await {
            AuthorizationStatus::Authorized => Ok(()),
            _ => Err(denied),
        },
        AuthorizationStatus::Denied | AuthorizationStatus::Restricted => Err(denied),
    }
}

#[derive(Default)]
struct CachedTokens {
    developer: Option<String>,
    user: Option<String>,
}

type DeveloperTokenLoader = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// Obtains and caches the developer and user tokens.
///
/// The whole acquisition sequence runs under one async lock: a caller that
/// arrives while another acquisition is in flight waits for it and then reads
/// the freshly cached tokens instead of starting a second authorization flow.
pub struct TokenManager {
    developer_token_loader: DeveloperTokenLoader,
    permission: Arc<dyn Authorization>,
    provider: Arc<dyn UserTokenProvider>,
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<CachedTokens>,
}

impl TokenManager {
    pub fn new(
        load_developer_token: impl Fn() -> Option<String> + Send + Sync + 'static,
        permission: Arc<dyn Authorization>,
        provider: Arc<dyn UserTokenProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        TokenManager {
            developer_token_loader: Box::new(load_developer_token),
            permission,
            provider,
            store,
            cached: Mutex::new(CachedTokens::default()),
        }
    }

    /// Token manager reading the developer token from the environment.
    pub fn from_config(
        permission: Arc<dyn Authorization>,
        provider: Arc<dyn UserTokenProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self::new(config::developer_token, permission, provider, store)
    }

    pub async fn ensure_tokens(&self) -> Result<Credentials> {
        let mut cached = self.cached.lock().await;

        if cached.developer.is_none() {
            cached.developer = Some(self.load_developer_token()?);
        }

        if cached.user.is_none() {
            if let Some(developer) = cached.developer.clone() {
                cached.user = Some(self.ensure_user_token(&developer).await?);
            }
        }

        let Some(developer_token) = cached.developer.clone() else {
            return Err(Error::MissingServiceToken);
        };
        let Some(user_token) = cached.user.clone() else {
            return Err(Error::UserTokenFetchFailed("no user token".to_string()));
        };

        Ok(Credentials {
            developer_token,
            user_token,
        })
    }

    /// Forgets the user token so the next acquisition re-runs the authorization flow.
    pub async fn invalidate_user_token(&self) {
        let mut cached = self.cached.lock().await;
        cached.user = None;
        if let Err(e) = self.store.remove(config::USER_TOKEN_KEY).await {
            warning!("Failed to remove stored user token: {}", e);
        }
    }

    pub async fn has_user_token(&self) -> bool {
        self.cached.lock().await.user.is_some()
    }

    fn load_developer_token(&self) -> Result<String> {
        (self.developer_token_loader)()
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingServiceToken)
    }

    async fn ensure_user_token(&self, developer_token: &str) -> Result<String> {
        if let Some(stored) = self
            .store
            .get(config::USER_TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
        {
            return Ok(stored);
        }

        ensure_authorized(self.permission.as_ref(), Error::UserTokenDenied).await?;

        info!("Requesting Apple Music user token...");
        let token = self
            .provider
            .fetch_user_token(developer_token)
            .await
            .and_then(|token| {
                if token.is_empty() {
                    Err(Error::UserTokenFetchFailed("empty user token".to_string()))
                } else {
                    Ok(token)
                }
            })?;

        if let Err(e) = self.store.set(config::USER_TOKEN_KEY, &token).await {
            warning!("Failed to persist user token: {}", e);
        }
        Ok(token)
    }
}
