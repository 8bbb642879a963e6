use std::sync::Arc;

use crate::{
    apple_music::{AppleMusicCatalog, BrowserTokenProvider, TerminalConsent},
    config, info,
    management::{
        Authorization, Catalog, CatalogSearch, FileStore, KeyValueStore, TokenManager,
        TrackResolver,
    },
    player::{PlaybackSession, Player, SessionConfig, TimelinePlayer},
    scanner::Scanner,
    types::Category,
};

/// The long-lived components of one process, built once and passed around.
pub struct App {
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: Arc<Catalog>,
    pub tokens: Arc<TokenManager>,
    pub resolver: Arc<TrackResolver>,
    pub session: Arc<PlaybackSession>,
    pub scanner: Arc<Scanner>,
}

impl App {
    /// Wires the Apple Music collaborators and the headless player from configuration.
    pub async fn bootstrap() -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::default_location());
        let catalog = Catalog::load_dir(&config::lists_dir()).await;
        for category in Category::ALL {
            info!("{}: {} songs", category, catalog.len(category));
        }

        let tokens = TokenManager::from_config(
            Arc::new(TerminalConsent::cloud_service(Arc::clone(&store))),
            Arc::new(BrowserTokenProvider::default()),
            Arc::clone(&store),
        );

        Self::assemble(
            Arc::clone(&store),
            catalog,
            tokens,
            Arc::new(AppleMusicCatalog::from_config()),
            Arc::new(TimelinePlayer::new()),
            Arc::new(TerminalConsent::music(Arc::clone(&store))),
            SessionConfig::from_config(),
        )
    }

    pub fn assemble(
        store: Arc<dyn KeyValueStore>,
        catalog: Catalog,
        tokens: TokenManager,
        search: Arc<dyn CatalogSearch>,
        player: Arc<dyn Player>,
        authorization: Arc<dyn Authorization>,
        session_config: SessionConfig,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let tokens = Arc::new(tokens);
        let resolver = Arc::new(TrackResolver::new(search));
        let session = Arc::new(PlaybackSession::new(
            player,
            authorization,
            Arc::clone(&tokens),
            Arc::clone(&resolver),
            session_config,
        ));
        let scanner = Arc::new(Scanner::new(Arc::clone(&catalog), Arc::clone(&session)));

        Self {
            store,
            catalog,
            tokens,
            resolver,
            session,
            scanner,
        }
    }
}
