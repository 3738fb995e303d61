//! Grocer Core - client logic for the grocery marketplace
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (User, Session, roles, form payloads)
//! - **ports**: Trait definitions for external dependencies (SessionStore, MarketplaceApi)
//! - **services**: Business logic orchestration (session context, account, catalog, ...)
//! - **adapters**: Concrete implementations (file storage, HTTP client)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use adapters::{FileSessionStore, HttpMarketplaceClient};
use config::Config;
use ports::{MarketplaceApi, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Capability, Product, Session, SessionState, User, UserType, View};
pub use services::{EntryPoint, LogEvent, LoggingService, Rehydration, SessionHandle};

/// Main context for grocer operations
///
/// Owns the session provider for the lifetime of the process and wires
/// every service to it. Services receive handles, never the provider.
pub struct GrocerContext {
    pub config: Config,
    pub app_dir: PathBuf,
    pub account_service: AccountService,
    pub catalog_service: CatalogService,
    pub warehouse_service: WarehouseService,
    pub invite_service: InviteService,
    session_provider: SessionProvider,
}

impl GrocerContext {
    /// Build a context on top of `app_dir`: file-backed session storage
    /// and the HTTP marketplace client from configuration
    pub fn new(app_dir: &Path) -> Result<Self> {
        let config = Config::load(app_dir)?;
        let store = FileSessionStore::new(app_dir).context("Failed to open session storage")?;
        let client = HttpMarketplaceClient::new(&config.api_url, config.timeout_secs)
            .context("Failed to create marketplace client")?;
        Ok(Self::with_parts(app_dir, config, Box::new(store), Rc::new(client)))
    }

    /// Build a context from explicit storage and backend implementations
    pub fn with_parts(
        app_dir: &Path,
        config: Config,
        store: Box<dyn SessionStore>,
        api: Rc<dyn MarketplaceApi>,
    ) -> Self {
        let session_provider = SessionProvider::new(store);

        Self {
            config,
            app_dir: app_dir.to_path_buf(),
            account_service: AccountService::new(Rc::clone(&api), session_provider.handle()),
            catalog_service: CatalogService::new(Rc::clone(&api), session_provider.handle()),
            warehouse_service: WarehouseService::new(Rc::clone(&api), session_provider.handle()),
            invite_service: InviteService::new(api, session_provider.handle()),
            session_provider,
        }
    }

    /// Accessor for the session owned by this context
    pub fn session(&self) -> SessionHandle {
        self.session_provider.handle()
    }

    /// What startup found in session storage
    pub fn rehydration(&self) -> &Rehydration {
        self.session_provider.rehydration()
    }
}
