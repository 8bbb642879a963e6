//! # Apple Music Integration Module
//!
//! Concrete collaborators that connect the resolution core to Apple Music.
//!
//! ```text
//! Session / Resolver / Token Manager
//!          ↓
//! Apple Music Integration Layer
//!     ├── Catalog search (REST, reqwest)
//!     ├── User token flow (MusicKit JS in the browser, local callback server)
//!     └── Terminal consent (remembered permission decisions)
//!          ↓
//! api.music.apple.com
//! ```
//!
//! ## Catalog search
//!
//! [`AppleMusicCatalog`] calls `GET /catalog/{storefront}/search` with
//! `types=songs`, authenticated with the developer token as bearer and the
//! user token in the `Music-User-Token` header.
//!
//! ## User token
//!
//! [`BrowserTokenProvider`] runs the sign-in flow described on its type. The
//! token is persisted by the token manager, so the browser only opens on the
//! first run or after Apple rejects the stored token.
//!
//! ## Consent
//!
//! [`TerminalConsent`] stands in for the platform permission dialogs. The
//! answer is stored so later runs see a decided status.

mod auth;
mod consent;
mod search;

pub use auth::BrowserTokenProvider;
pub use consent::{
    CLOUD_SERVICE_CONSENT_KEY, MUSIC_CONSENT_KEY, TerminalConsent, forget_decisions,
};
pub use search::AppleMusicCatalog;
