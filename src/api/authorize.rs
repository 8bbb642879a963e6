use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::PendingUserToken;

const PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>musicard - connect Apple Music</title>
<script src="https://js-cdn.music.apple.com/musickit/v3/musickit.js" data-web-components async></script>
</head>
<body>
<h2>Connecting musicard to Apple Music...</h2>
<script>
const developerToken = __DEVELOPER_TOKEN__;
const state = __STATE__;
const finish = (query) => { window.location.href = `/callback?state=${encodeURIComponent(state)}&${query}`; };
document.addEventListener('musickitloaded', async () => {
  try {
    await MusicKit.configure({ developerToken, app: { name: 'musicard', build: '__VERSION__' } });
    const token = await MusicKit.getInstance().authorize();
    token ? finish(`token=${encodeURIComponent(token)}`) : finish('error=denied');
  } catch (e) {
    finish(`error=${encodeURIComponent(e && e.errorCode === 'AUTHORIZATION_ERROR' ? 'denied' : String(e))}`);
  }
});
</script>
</body>
</html>
"#;

/// Serves the MusicKit JS page that asks the user to sign in.
pub async fn authorize(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingUserToken>>>>,
) -> Html<String> {
    let state = shared_state.lock().await;
    let Some(pending) = state.as_ref() else {
        return Html("<h4>No authorization in progress.</h4>".to_string());
    };

    if params.get("state") != Some(&pending.state) {
        return Html("<h4>Authorization state mismatch.</h4>".to_string());
    }

    Html(render_page(&pending.developer_token, &pending.state))
}

fn render_page(developer_token: &str, state: &str) -> String {
    let quote = |value: &str| serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string());
    PAGE.replace("__DEVELOPER_TOKEN__", &quote(developer_token))
        .replace("__STATE__", &quote(state))
        .replace("__VERSION__", env!("CARGO_PKG_VERSION"))
}
