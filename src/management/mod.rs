mod auth;
mod catalog;
mod resolver;
mod store;

pub use auth::{Authorization, TokenManager, UserTokenProvider, ensure_authorized};
pub use catalog::Catalog;
pub use resolver::{CatalogSearch, TrackResolver};
pub use store::{FileStore, KeyValueStore};
