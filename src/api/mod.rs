//! # API Module
//!
//! HTTP endpoints of the short-lived local server that obtains an Apple Music
//! user token. Apple only hands out user tokens to a signed-in MusicKit
//! instance, so the CLI opens a browser on [`authorize`], which loads MusicKit
//! JS with the developer token and sends the resulting token to [`callback`].
//!
//! ## Endpoints
//!
//! - [`authorize`] - Serves the MusicKit JS sign-in page for a pending request
//! - [`callback`] - Receives the user token (or the refusal) from that page
//! - [`health`] - Health check returning service name and version
//!
//! Every request must carry the `state` nonce of the pending authorization;
//! the shared state is the same `Arc<Mutex<Option<PendingUserToken>>>` the
//! waiting token provider polls.

mod authorize;
mod callback;
mod health;

pub use authorize::authorize;
pub use callback::callback;
pub use health::health;
