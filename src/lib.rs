//! Card-to-song playback library.
//!
//! This library turns the code printed on a song card into a playing Apple Music
//! track. It extracts the card identifier from the scanned string, resolves it
//! against the bundled song lists, finds the matching catalog track and drives a
//! playback session whose state mirrors the attached player.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local user-token authorization server
//! - `apple_music` - Apple Music catalog client and browser token flow
//! - `app` - Wiring of the long-lived components for one process
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and user-facing status messages
//! - `management` - Catalog, token, resolver and storage managers
//! - `player` - Player collaborator, headless player and session controller
//! - `scanner` - Debounce gate in front of the session
//! - `server` - Local HTTP server for the authorization callback
//! - `types` - Data structures and type definitions
//! - `utils` - Card code parsing and formatting helpers
//!
//! # Example
//!
//! ```
//! use musicard::{app::App, config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     config::load_env().await?;
//!     let app = App::bootstrap().await;
//!     let outcome = app.scanner.handle_scan("https://www.hitstergame.com/nl/00042").await;
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod apple_music;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod player;
pub mod scanner;
pub mod server;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Waiting for a card scan...");
/// info!("Loaded {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Apple Music tokens ready");
/// success!("Playing {}", title);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Cannot bind authorization server: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Missing xmas.txt, category stays empty");
/// warning!("Skip to previous failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
