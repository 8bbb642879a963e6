//! Error taxonomy shared by the resolution and playback core.
//!
//! Every failure that can happen between a scan and a playing track is one of
//! these variants. The session controller recovers all of them at its boundary
//! and turns them into a status line with [`Error::status_message`].

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The scanned string carries no usable card number.
    #[error("no card identifier in scanned code")]
    Extraction,

    /// The identifier is outside the category list, or the list is empty.
    #[error("card identifier not in catalog")]
    CatalogMiss,

    /// No developer token configured.
    #[error("developer token missing from configuration")]
    MissingServiceToken,

    /// The user declined or could not grant access to the cloud service.
    #[error("user token request denied")]
    UserTokenDenied,

    #[error("failed to fetch user token: {0}")]
    UserTokenFetchFailed(String),

    /// Music library access was not granted.
    #[error("music authorization denied")]
    AuthorizationDenied,

    #[error("no catalog result for this song")]
    TrackNotFound,

    /// The catalog rejected the credentials (HTTP 401/403).
    #[error("catalog rejected credentials")]
    Unauthorized,

    /// Queue, play, pause or skip failed on the external player.
    #[error("player command failed: {0}")]
    PlayerCommand(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Human readable line for the status area of the presentation layer.
    pub fn status_message(&self) -> String {
        match self {
            Error::Extraction | Error::CatalogMiss => "No song found for this card.".to_string(),
            Error::MissingServiceToken => {
                "Add your MusicKit developer token to the configuration.".to_string()
            }
            Error::UserTokenDenied => "Apple Music access was denied.".to_string(),
            Error::UserTokenFetchFailed(_) => {
                "Could not fetch an Apple Music user token.".to_string()
            }
            Error::AuthorizationDenied => "Apple Music access is required.".to_string(),
            Error::TrackNotFound => "No catalog result found for this song.".to_string(),
            Error::Unauthorized => {
                "Apple Music rejected the stored login, scan again to sign in.".to_string()
            }
            Error::PlayerCommand(e) => format!("Playback failed: {}", e),
            Error::Http(_) => "Could not reach Apple Music.".to_string(),
            Error::Storage(e) => format!("Error: {}", e),
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}
