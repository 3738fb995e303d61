//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Plain files under the app directory for the SessionStore port
//! - An in-memory map for the SessionStore port (tests, throwaway sessions)
//! - A blocking reqwest client for the MarketplaceApi port

pub mod file_store;
pub mod marketplace;
pub mod memory_store;

#[cfg(test)]
pub mod mock_backend;

pub use file_store::FileSessionStore;
pub use marketplace::{HttpMarketplaceClient, DEFAULT_TIMEOUT_SECS};
pub use memory_store::MemorySessionStore;
