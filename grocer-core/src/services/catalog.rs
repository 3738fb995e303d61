//! Catalog service - product search, registration and warehouse assignment

use std::rc::Rc;

use crate::domain::result::Result;
use crate::domain::{AssignmentForm, Capability, Product, ProductForm, SearchQuery};
use crate::ports::MarketplaceApi;
use crate::services::session::SessionHandle;

pub struct CatalogService {
    api: Rc<dyn MarketplaceApi>,
    session: SessionHandle,
}

impl CatalogService {
    pub fn new(api: Rc<dyn MarketplaceApi>, session: SessionHandle) -> Self {
        Self { api, session }
    }

    /// Search by product name; a blank term lists every product
    pub fn search(&self, term: &str) -> Result<Vec<Product>> {
        let caller = self.session.authorize(Capability::SearchProducts)?;
        self.api.search_products(&caller, &SearchQuery::new(term))
    }

    pub fn register_product(&self, form: &ProductForm) -> Result<()> {
        let caller = self.session.authorize(Capability::RegisterProduct)?;
        let product = form.validate()?;
        self.api.register_product(&caller, &product)
    }

    /// Stock an existing product in a warehouse
    pub fn assign_to_warehouse(&self, form: &AssignmentForm) -> Result<()> {
        let caller = self.session.authorize(Capability::AssignProduct)?;
        let item = form.validate()?;
        self.api.assign_product(&caller, &item)
    }
}
