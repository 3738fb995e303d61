//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Every service
//! that talks to the backend reads the session through a `SessionHandle`
//! and refuses to make a request the signed-in role is not entitled to.

mod account;
mod catalog;
mod invite;
pub mod logging;
pub mod session;
mod warehouse;

#[cfg(test)]
mod fake_api;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use invite::InviteService;
pub use logging::{
    token_fingerprint, EntryPoint, EventCount, LogEntry, LogEvent, LogFilter, LoggingService,
};
pub use session::{Rehydration, SessionHandle, SessionProvider};
pub use warehouse::WarehouseService;
