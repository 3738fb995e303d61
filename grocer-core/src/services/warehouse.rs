//! Warehouse service

use std::rc::Rc;

use crate::domain::result::Result;
use crate::domain::{Capability, NewWarehouse, WarehouseForm};
use crate::ports::MarketplaceApi;
use crate::services::session::SessionHandle;

pub struct WarehouseService {
    api: Rc<dyn MarketplaceApi>,
    session: SessionHandle,
}

impl WarehouseService {
    pub fn new(api: Rc<dyn MarketplaceApi>, session: SessionHandle) -> Self {
        Self { api, session }
    }

    /// Create a warehouse; returns the request that was accepted
    pub fn create(&self, form: &WarehouseForm) -> Result<NewWarehouse> {
        let caller = self.session.authorize(Capability::CreateWarehouse)?;
        let warehouse = form.validate()?;
        self.api.create_warehouse(&caller, &warehouse)?;
        Ok(warehouse)
    }
}
