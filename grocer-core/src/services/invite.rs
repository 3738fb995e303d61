//! Invitation service - onboarding administrators

use std::rc::Rc;

use crate::domain::result::Result;
use crate::domain::{
    AppAdminInvite, AppAdminInviteForm, Capability, WarehouseAdminInvite,
    WarehouseAdminInviteForm,
};
use crate::ports::MarketplaceApi;
use crate::services::session::SessionHandle;

pub struct InviteService {
    api: Rc<dyn MarketplaceApi>,
    session: SessionHandle,
}

impl InviteService {
    pub fn new(api: Rc<dyn MarketplaceApi>, session: SessionHandle) -> Self {
        Self { api, session }
    }

    /// Invite an application administrator (created inactive)
    pub fn invite_app_admin(&self, form: &AppAdminInviteForm) -> Result<AppAdminInvite> {
        let caller = self.session.authorize(Capability::InviteAppAdmin)?;
        let invite = form.validate()?;
        self.api.invite_app_admin(&caller, &invite)?;
        Ok(invite)
    }

    pub fn invite_warehouse_admin(
        &self,
        form: &WarehouseAdminInviteForm,
    ) -> Result<WarehouseAdminInvite> {
        let caller = self.session.authorize(Capability::InviteWarehouseAdmin)?;
        let invite = form.validate()?;
        self.api.invite_warehouse_admin(&caller, &invite)?;
        Ok(invite)
    }
}
