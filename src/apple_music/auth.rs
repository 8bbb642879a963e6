use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Error, Result, info,
    management::UserTokenProvider,
    server::{bind_api_server, start_api_server},
    success,
    types::{PendingUserToken, UserTokenOutcome},
    utils, warning,
};

/// Obtains a user token by signing in through MusicKit JS in the browser.
///
/// The flow mirrors a desktop OAuth login:
/// 1. bind the local authorization server and register a pending request
///    with a random `state` nonce
/// 2. open `/authorize` in the default browser, which loads MusicKit JS with
///    the developer token and asks the user to sign in
/// 3. the page redirects to `/callback` with the user token or a refusal
/// 4. the pending request is polled until an outcome arrives or the wait
///    times out
pub struct BrowserTokenProvider {
    max_wait: Duration,
}

impl BrowserTokenProvider {
    pub fn new(max_wait: Duration) -> Self {
        Self { max_wait }
    }
}

impl Default for BrowserTokenProvider {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

#[async_trait]
impl UserTokenProvider for BrowserTokenProvider {
    async fn fetch_user_token(&self, developer_token: &str) -> Result<String> {
        let (listener, addr) = bind_api_server().await?;
        let state = utils::generate_state_nonce();
        let shared_state = Arc::new(Mutex::new(Some(PendingUserToken {
            state: state.clone(),
            developer_token: developer_token.to_string(),
            outcome: None,
        })));

        let server_state = Arc::clone(&shared_state);
        let server = tokio::spawn(async move {
            start_api_server(listener, server_state).await;
        });

        let auth_url = format!("http://{addr}/authorize?state={state}");
        if webbrowser::open(&auth_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            );
        } else {
            info!("Sign in to Apple Music in your browser to continue.");
        }

        let outcome = wait_for_outcome(&shared_state, self.max_wait).await;
        server.abort();

        match outcome {
            Some(UserTokenOutcome::Granted(token)) => {
                success!("Apple Music user token received.");
                Ok(token)
            }
            Some(UserTokenOutcome::Denied) => Err(Error::UserTokenDenied),
            Some(UserTokenOutcome::Failed(reason)) => Err(Error::UserTokenFetchFailed(reason)),
            None => Err(Error::UserTokenFetchFailed(
                "authorization timed out".to_string(),
            )),
        }
    }
}

/// Polls the pending request once per second until the callback fills it in.
async fn wait_for_outcome(
    shared_state: &Arc<Mutex<Option<PendingUserToken>>>,
    max_wait: Duration,
) -> Option<UserTokenOutcome> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_ref().and_then(|pending| pending.outcome.clone()) {
            return Some(outcome);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
