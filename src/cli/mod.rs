//! # CLI Module
//!
//! User-facing commands of the `musicard` binary. Each command receives the
//! [`App`](crate::app::App) built at startup and reports through the console
//! macros exported by the crate root.
//!
//! ## Commands
//!
//! - [`auth`] - Acquires the developer and user tokens, optionally forgetting
//!   the stored user token first
//! - [`lookup`] - Shows which song a scanned code maps to, and optionally the
//!   Apple Music track it resolves to
//! - [`list`] - Prints one song list as a table
//! - [`play`] - Plays one code and follows its progress
//! - [`listen`] - Reads scanned codes and transport commands from stdin
//!
//! ## Usage Patterns
//!
//! ```bash
//! musicard auth                                   # Sign in once
//! musicard lookup "https://hitstergame.com/nl/00042" --track
//! musicard list --category xmas --search wham
//! musicard play "https://hitstergame.com/nl/aaaa0037/00002"
//! zbarcam --raw | musicard listen                 # Scanner feeding codes
//! ```

mod auth;
mod list;
mod lookup;
mod play;

pub use auth::auth;
pub use list::list;
pub use lookup::lookup;
pub use play::listen;
pub use play::play;
