//! In-process `MarketplaceApi` double for service tests

use std::cell::RefCell;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AppAdminInvite, AuthGrant, Credentials, NewProduct, NewWarehouse, Product, SearchQuery,
    SignupRequest, User, UserType, WarehouseAdminInvite, WarehouseItem,
};
use crate::ports::{Caller, MarketplaceApi};

pub const GOOD_PASSWORD: &str = "password123";

/// Records every call and answers from canned data
#[derive(Default)]
pub struct FakeMarketplace {
    pub calls: RefCell<Vec<String>>,
    pub callers: RefCell<Vec<Caller>>,
    /// Role handed out by sign-in
    pub role: Option<UserType>,
    pub products: Vec<Product>,
}

impl FakeMarketplace {
    pub fn with_role(role: UserType) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, name: &str, caller: Option<&Caller>) {
        self.calls.borrow_mut().push(name.to_string());
        if let Some(caller) = caller {
            self.callers.borrow_mut().push(caller.clone());
        }
    }
}

pub fn user(role: UserType) -> User {
    User {
        id: "u1".into(),
        user_name: "alice".into(),
        email: "a@x.com".into(),
        phone_number: 5551234567,
        user_type: role,
        status: "ACTIVE".into(),
    }
}

impl MarketplaceApi for FakeMarketplace {
    fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant> {
        self.record("sign_in", None);
        if credentials.password != GOOD_PASSWORD {
            return Err(Error::Unauthorized("Invalid email or password".into()));
        }
        Ok(AuthGrant {
            token: "tok-123".into(),
            user: user(self.role.unwrap_or(UserType::Consumer)),
        })
    }

    fn sign_up(&self, _request: &SignupRequest) -> Result<()> {
        self.record("sign_up", None);
        Ok(())
    }

    fn search_products(&self, caller: &Caller, query: &SearchQuery) -> Result<Vec<Product>> {
        self.record("search_products", Some(caller));
        let term = query.term().map(str::to_lowercase);
        Ok(self
            .products
            .iter()
            .filter(|p| match &term {
                Some(t) => p.product_name.to_lowercase().contains(t.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn register_product(&self, caller: &Caller, _product: &NewProduct) -> Result<()> {
        self.record("register_product", Some(caller));
        Ok(())
    }

    fn assign_product(&self, caller: &Caller, _item: &WarehouseItem) -> Result<()> {
        self.record("assign_product", Some(caller));
        Ok(())
    }

    fn create_warehouse(&self, caller: &Caller, _warehouse: &NewWarehouse) -> Result<()> {
        self.record("create_warehouse", Some(caller));
        Ok(())
    }

    fn invite_app_admin(&self, caller: &Caller, _invite: &AppAdminInvite) -> Result<()> {
        self.record("invite_app_admin", Some(caller));
        Ok(())
    }

    fn invite_warehouse_admin(&self, caller: &Caller, _invite: &WarehouseAdminInvite) -> Result<()> {
        self.record("invite_warehouse_admin", Some(caller));
        Ok(())
    }
}
