//! Configuration management for musicard.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the Apple
//! Music developer token, API endpoints, the local authorization server and the
//! playback tuning knobs.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

/// Key under which the user token is persisted in the local store.
pub const USER_TOKEN_KEY: &str = "MusicKitUserToken";

const DEFAULT_API_URL: &str = "https://api.music.apple.com/v1";
const DEFAULT_STOREFRONT: &str = "us";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8787";
const DEFAULT_START_OFFSET: f64 = 0.4;
const DEFAULT_SYNC_INTERVAL_MS: u64 = 500;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `musicard` directory if it doesn't exist and loads variables
/// from `musicard/.env` when present. A missing file is not an error; values
/// can come from the process environment alone.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/musicard/.env`
/// - macOS: `~/Library/Application Support/musicard/.env`
/// - Windows: `%LOCALAPPDATA%/musicard/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root directory for everything musicard keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musicard");
    path
}

/// Returns the MusicKit developer token, if one is configured.
///
/// Reads `MUSICARD_DEVELOPER_TOKEN`. An empty value counts as absent.
pub fn developer_token() -> Option<String> {
    env::var("MUSICARD_DEVELOPER_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Returns the Apple Music API base URL (`APPLE_MUSIC_API_URL`).
pub fn apple_music_api_url() -> String {
    env::var("APPLE_MUSIC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the catalog storefront used for searches (`APPLE_MUSIC_STOREFRONT`).
pub fn storefront() -> String {
    env::var("APPLE_MUSIC_STOREFRONT").unwrap_or_else(|_| DEFAULT_STOREFRONT.to_string())
}

/// Returns the address the local authorization server binds to.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:8787`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Directory holding the `list.txt`, `xmas.txt`, ... song lists.
pub fn lists_dir() -> PathBuf {
    env::var("MUSICARD_LISTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("lists"))
}

/// Path of the JSON file backing the durable key/value store.
pub fn store_path() -> PathBuf {
    data_dir().join("cache/store.json")
}

/// Fraction of the track duration at which playback starts.
///
/// Reads `MUSICARD_START_OFFSET`; invalid values fall back to `0.4`.
pub fn start_offset_ratio() -> f64 {
    env::var("MUSICARD_START_OFFSET")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|ratio| (0.0..1.0).contains(ratio))
        .unwrap_or(DEFAULT_START_OFFSET)
}

/// Period of the player synchronization tick (`MUSICARD_SYNC_INTERVAL_MS`).
pub fn sync_interval() -> Duration {
    let millis = env::var("MUSICARD_SYNC_INTERVAL_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_SYNC_INTERVAL_MS);
    Duration::from_millis(millis)
}
