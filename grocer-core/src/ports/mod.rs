//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod marketplace;
mod session_store;

pub use marketplace::{Caller, MarketplaceApi};
pub use session_store::{SessionStore, StorageKey};
