//! Marketplace backend port
//!
//! Defines the interface to the remote marketplace REST service. Services
//! depend on this trait; the HTTP client is one implementation.

use crate::domain::result::Result;
use crate::domain::{
    AppAdminInvite, AuthGrant, Credentials, NewProduct, NewWarehouse, Product, SearchQuery,
    SignupRequest, WarehouseAdminInvite, WarehouseItem,
};

/// Identity attached to authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Sent verbatim in the `Authorization` header
    pub token: String,
    /// Sent as the `userId` query parameter
    pub user_id: String,
}

/// Marketplace backend operations
pub trait MarketplaceApi {
    /// Exchange credentials for a token and user record
    fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// Create a consumer account
    fn sign_up(&self, request: &SignupRequest) -> Result<()>;

    /// Search products; a query without a term lists everything
    fn search_products(&self, caller: &Caller, query: &SearchQuery) -> Result<Vec<Product>>;

    fn register_product(&self, caller: &Caller, product: &NewProduct) -> Result<()>;

    fn assign_product(&self, caller: &Caller, item: &WarehouseItem) -> Result<()>;

    fn create_warehouse(&self, caller: &Caller, warehouse: &NewWarehouse) -> Result<()>;

    fn invite_app_admin(&self, caller: &Caller, invite: &AppAdminInvite) -> Result<()>;

    fn invite_warehouse_admin(&self, caller: &Caller, invite: &WarehouseAdminInvite) -> Result<()>;
}
