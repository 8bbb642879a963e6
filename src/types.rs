use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One of the independent song lists a card can belong to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Standard,
    Xmas,
    Movies,
    Schlager,
    GuiltyPleasure,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Standard,
        Category::Xmas,
        Category::Movies,
        Category::Schlager,
        Category::GuiltyPleasure,
    ];

    /// File stem of the bundled list, without the `.txt` extension.
    pub fn list_stem(self) -> &'static str {
        match self {
            Category::Standard => "list",
            Category::Xmas => "xmas",
            Category::Movies => "movi",
            Category::Schlager => "schl",
            Category::GuiltyPleasure => "gupl",
        }
    }

    /// Marker substring printed in the card code. The default list has none.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Category::Standard => None,
            Category::Xmas => Some("aaaa0037"),
            Category::Movies => Some("aaaa0027"),
            Category::Schlager => Some("aaaa0007"),
            Category::GuiltyPleasure => Some("aaaa0006"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Standard => "standard",
            Category::Xmas => "xmas",
            Category::Movies => "movies",
            Category::Schlager => "schlager",
            Category::GuiltyPleasure => "guilty_pleasure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "standard" | "list" => Ok(Category::Standard),
            "xmas" => Ok(Category::Xmas),
            "movies" | "movi" => Ok(Category::Movies),
            "schlager" | "schl" => Ok(Category::Schlager),
            "guilty_pleasure" | "gupl" => Ok(Category::GuiltyPleasure),
            other => Err(format!(
                "unknown category '{}', expected one of: standard, xmas, movies, schlager, guilty_pleasure",
                other
            )),
        }
    }
}

/// Identity of a catalog entry: its position and the list it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub id: u32,
    pub category: Category,
}

/// A song printed on a card.
///
/// Equality and hashing only look at `(id, category)`, so the same number in
/// two different lists are two different songs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub category: Category,
    pub artist: String,
    pub title: String,
}

impl CatalogEntry {
    /// Builds an entry from one raw `Artist - Title` line.
    pub fn from_line(id: u32, category: Category, raw_line: &str) -> Self {
        let full = raw_line.trim();
        // Leading hyphens and an empty title do not count as a split.
        let line = raw_line.trim_start_matches('-');
        let (artist, title) = match line.split_once('-') {
            Some((artist, title)) if !title.is_empty() => (artist.trim(), title.trim()),
            Some((artist, _)) => (artist.trim(), full),
            None if line.is_empty() => (full, full),
            None => (line.trim(), full),
        };

        let or_full = |side: &str| {
            if side.is_empty() {
                full.to_string()
            } else {
                side.to_string()
            }
        };

        Self {
            id,
            category,
            artist: or_full(artist),
            title: or_full(title),
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            id: self.id,
            category: self.category,
        }
    }

    /// Free text query sent to the catalog search.
    pub fn search_term(&self) -> String {
        format!("{} {}", self.artist, self.title)
    }
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CatalogEntry {}

impl Hash for CatalogEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[derive(Tabled)]
pub struct EntryTableRow {
    pub id: u32,
    pub artist: String,
    pub title: String,
}

/// A concrete playable catalog track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub url: Option<String>,
}

/// Developer and user token pair required by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub developer_token: String,
    pub user_token: String,
}

/// Browser authorization in progress, shared with the callback handler.
#[derive(Debug, Clone)]
pub struct PendingUserToken {
    pub state: String,
    pub developer_token: String,
    pub outcome: Option<UserTokenOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserTokenOutcome {
    Granted(String),
    Denied,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Restricted,
    Authorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Authorizing,
    Resolving,
    Queueing,
    Playing,
    Paused,
    Failed,
}

/// Observable playback session, published to subscribers on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub current_entry: Option<CatalogEntry>,
    pub is_playing: bool,
    pub position: Duration,
    pub duration: Duration,
    pub status_message: String,
}

/// Outcome of one `play` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Failed,
    /// Another play sequence was still running; nothing happened.
    Busy,
}

// Apple Music catalog search payloads.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: SearchResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub songs: Option<SongsPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongsPage {
    pub data: Vec<SongResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongResource {
    pub id: String,
    pub attributes: SongAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAttributes {
    pub name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    pub duration_in_millis: Option<u64>,
    pub url: Option<String>,
}

impl From<SongResource> for Track {
    fn from(song: SongResource) -> Self {
        Track {
            id: song.id,
            title: song.attributes.name,
            artist: song.attributes.artist_name,
            album: song.attributes.album_name,
            duration: song.attributes.duration_in_millis.map(Duration::from_millis),
            url: song.attributes.url,
        }
    }
}
