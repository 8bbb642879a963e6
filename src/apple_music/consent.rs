use std::{
    io::{self, BufRead, Write},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    Result,
    management::{Authorization, KeyValueStore},
    types::AuthorizationStatus,
    warning,
};

pub const MUSIC_CONSENT_KEY: &str = "MusicAuthorization";
pub const CLOUD_SERVICE_CONSENT_KEY: &str = "CloudServiceAuthorization";

/// Forgets every remembered permission answer, so the next run asks again.
pub async fn forget_decisions(store: &dyn KeyValueStore) -> Result<()> {
    for key in [MUSIC_CONSENT_KEY, CLOUD_SERVICE_CONSENT_KEY] {
        store.remove(key).await?;
    }
    Ok(())
}

/// Permission answered once on the terminal and remembered in the store.
pub struct TerminalConsent {
    key: String,
    prompt: String,
    store: Arc<dyn KeyValueStore>,
}

impl TerminalConsent {
    pub fn new(
        key: impl Into<String>,
        prompt: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            store,
        }
    }

    /// Access to the Apple Music library and playback.
    pub fn music(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            MUSIC_CONSENT_KEY,
            "Allow musicard to play music from Apple Music?",
            store,
        )
    }

    /// Permission to request a user token from the cloud service.
    pub fn cloud_service(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            CLOUD_SERVICE_CONSENT_KEY,
            "Allow musicard to sign in to your Apple Music account?",
            store,
        )
    }
}

#[async_trait]
impl Authorization for TerminalConsent {
    async fn status(&self) -> AuthorizationStatus {
        match self.store.get(&self.key).await.as_deref() {
            Some("authorized") => AuthorizationStatus::Authorized,
            Some("denied") => AuthorizationStatus::Denied,
            _ => AuthorizationStatus::NotDetermined,
        }
    }

    async fn request(&self) -> AuthorizationStatus {
        let prompt = self.prompt.clone();
        let granted = tokio::task::spawn_blocking(move || ask(&prompt))
            .await
            .unwrap_or(false);

        let (status, value) = if granted {
            (AuthorizationStatus::Authorized, "authorized")
        } else {
            (AuthorizationStatus::Denied, "denied")
        };
        if let Err(e) = self.store.set(&self.key, value).await {
            warning!("Failed to remember authorization decision: {}", e);
        }
        status
    }
}

// Both permissions may be requested at the same time; one question at a time.
static PROMPT: Mutex<()> = Mutex::new(());

fn ask(prompt: &str) -> bool {
    let _turn = PROMPT.lock().unwrap_or_else(|e| e.into_inner());
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
