use crate::{app::App, apple_music, error, info, success, warning};

/// Acquires both Apple Music tokens, running the sign-in flow if needed.
pub async fn auth(app: &App, reset: bool) {
    if reset {
        info!("Forgetting stored user token and permission answers...");
        if let Err(e) = apple_music::forget_decisions(app.store.as_ref()).await {
            warning!("Failed to forget permission answers: {}", e);
        }
        app.tokens.invalidate_user_token().await;
    }

    match app.tokens.ensure_tokens().await {
        Ok(_) => success!("Apple Music tokens ready."),
        Err(e) => error!("{} ({})", e.status_message(), e),
    }
}
