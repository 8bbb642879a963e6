use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Error, Result, api, config, types::PendingUserToken};

/// Binds the authorization server on the configured address.
///
/// Binding happens before the browser is opened so a busy port fails the
/// flow immediately instead of leaving the page unreachable.
pub async fn bind_api_server() -> Result<(TcpListener, SocketAddr)> {
    let addr = SocketAddr::from_str(&config::server_addr()).map_err(|e| {
        Error::UserTokenFetchFailed(format!("invalid server address: {}", e))
    })?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::UserTokenFetchFailed(format!("cannot bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr().unwrap_or(addr);
    Ok((listener, local_addr))
}

pub async fn start_api_server(listener: TcpListener, state: Arc<Mutex<Option<PendingUserToken>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .layer(Extension(state));

    if let Err(e) = axum::serve(listener, app).await {
        crate::warning!("Authorization server stopped: {}", e);
    }
}
