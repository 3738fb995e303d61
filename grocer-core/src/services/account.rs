//! Account service - sign in, sign up, sign out

use std::rc::Rc;

use crate::domain::result::{Error, Result};
use crate::domain::{Credentials, SignupForm, View};
use crate::ports::MarketplaceApi;
use crate::services::session::SessionHandle;

/// Account operations against the marketplace
pub struct AccountService {
    api: Rc<dyn MarketplaceApi>,
    session: SessionHandle,
}

impl AccountService {
    pub fn new(api: Rc<dyn MarketplaceApi>, session: SessionHandle) -> Self {
        Self { api, session }
    }

    /// Authenticate and start a session
    ///
    /// Returns the view the signed-in role lands on. If the backend rejects
    /// the credentials the session is left exactly as it was.
    pub fn sign_in(&self, credentials: &Credentials) -> Result<View> {
        credentials.validate()?;
        let grant = self.api.sign_in(credentials)?;
        if grant.token.is_empty() {
            return Err(Error::Api {
                status: 200,
                message: "Sign-in response did not include a token".to_string(),
            });
        }

        let landing = grant.user.user_type.landing_view();
        self.session.login(&grant.token, grant.user)?;
        Ok(landing)
    }

    /// Create a consumer account; does not sign in
    pub fn sign_up(&self, form: &SignupForm) -> Result<()> {
        let request = form.validate()?;
        self.api.sign_up(&request)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
