use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    types::{PendingUserToken, UserTokenOutcome},
    warning,
};

/// Receives the result of the MusicKit JS authorization page.
///
/// The page redirects here with either `token` or `error`, plus the `state`
/// nonce it was opened with. Requests with an unknown nonce are ignored.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingUserToken>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring authorization callback with unexpected state");
        return Html("<h4>Authorization state mismatch.</h4>");
    }

    if let Some(token) = params.get("token").filter(|t| !t.is_empty()) {
        pending.outcome = Some(UserTokenOutcome::Granted(token.clone()));
        return Html("<h2>Apple Music connected.</h2><p>You can close this window.</p>");
    }

    match params.get("error").map(String::as_str) {
        Some("denied") => {
            pending.outcome = Some(UserTokenOutcome::Denied);
            Html("<h4>Apple Music access was denied.</h4>")
        }
        Some(other) => {
            pending.outcome = Some(UserTokenOutcome::Failed(other.to_string()));
            Html("<h4>Authorization failed.</h4>")
        }
        None => Html("<h4>Missing user token.</h4>"),
    }
}
