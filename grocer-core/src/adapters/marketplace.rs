//! Marketplace REST client
//!
//! Blocking HTTP client for the grocery marketplace backend. JSON bodies
//! in both directions; authenticated calls carry the stored token in the
//! `Authorization` header and the caller's id as `userId`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AppAdminInvite, AuthGrant, Credentials, NewProduct, NewWarehouse, Product, SearchQuery,
    SignupRequest, WarehouseAdminInvite, WarehouseItem,
};
use crate::ports::{Caller, MarketplaceApi};

// =============================================================================
// Endpoints
// =============================================================================

const SIGN_IN_PATH: &str = "/api/v1/user/signin";
const SIGN_UP_PATH: &str = "/api/v1/user/signup";
const PRODUCT_SEARCH_PATH: &str = "/api/v1/product/search";
const PRODUCT_REGISTER_PATH: &str = "/product/register";
const PRODUCT_ASSIGN_PATH: &str = "/api/v1/warehouse/product/assign";
const WAREHOUSE_CREATE_PATH: &str = "/warehouse/create";
const APP_ADMIN_INVITE_PATH: &str = "/api/invite-admin";
const WAREHOUSE_ADMIN_INVITE_PATH: &str = "/api/v1/warehouse-admin/invite";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error body returned by the backend on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =============================================================================
// HTTP client
// =============================================================================

/// Marketplace API client
#[derive(Debug)]
pub struct HttpMarketplaceClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl HttpMarketplaceClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("Marketplace API URL cannot be empty".to_string()));
        }
        let base_url = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid marketplace API URL '{}': {}", trimmed, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for `path`, keeping any path prefix of the base URL
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url(), path))
            .map_err(|e| Error::Config(format!("Invalid endpoint {}: {}", path, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder, caller: &Caller) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, &caller.token)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(|e| self.map_request_error(e))?;
        self.check_response_status(response)
    }

    fn post_authorized<T: Serialize + ?Sized>(&self, path: &str, caller: &Caller, body: &T) -> Result<()> {
        let url = self.endpoint(path, &[("userId", caller.user_id.as_str())])?;
        let request = self.authorized(self.client.post(url), caller).json(body);
        self.send(request)?;
        Ok(())
    }

    fn parse_json<T: DeserializeOwned>(&self, response: Response, what: &str) -> Result<T> {
        let text = response
            .text()
            .map_err(|e| Error::network(format!("Failed to read {} response: {}", what, e)))?;
        serde_json::from_str(&text).map_err(Error::from)
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::network(format!(
                "Connection timed out after {} seconds",
                self.timeout_secs
            ))
        } else if error.is_connect() {
            Error::network(format!(
                "Unable to connect to the marketplace at {}",
                self.base_url()
            ))
        } else {
            Error::network(format!("Marketplace request failed: {}", error))
        }
    }

    /// Turn non-success responses into errors carrying the backend message
    fn check_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                } else {
                    trimmed.to_string()
                }
            });

        match code {
            401 => Err(Error::Unauthorized(message)),
            _ => Err(Error::Api {
                status: code,
                message,
            }),
        }
    }
}

impl MarketplaceApi for HttpMarketplaceClient {
    fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let url = self.endpoint(SIGN_IN_PATH, &[])?;
        let response = self.send(self.client.post(url).json(credentials))?;
        self.parse_json(response, "sign-in")
    }

    fn sign_up(&self, request: &SignupRequest) -> Result<()> {
        let url = self.endpoint(SIGN_UP_PATH, &[])?;
        self.send(self.client.post(url).json(request))?;
        Ok(())
    }

    fn search_products(&self, caller: &Caller, query: &SearchQuery) -> Result<Vec<Product>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(term) = query.term() {
            params.push(("name", term));
        }
        params.push(("userId", caller.user_id.as_str()));

        let url = self.endpoint(PRODUCT_SEARCH_PATH, &params)?;
        let response = self.send(self.authorized(self.client.get(url), caller))?;
        // A null body means "no results"
        let products: Option<Vec<Product>> = self.parse_json(response, "product search")?;
        Ok(products.unwrap_or_default())
    }

    fn register_product(&self, caller: &Caller, product: &NewProduct) -> Result<()> {
        self.post_authorized(PRODUCT_REGISTER_PATH, caller, product)
    }

    fn assign_product(&self, caller: &Caller, item: &WarehouseItem) -> Result<()> {
        self.post_authorized(PRODUCT_ASSIGN_PATH, caller, item)
    }

    fn create_warehouse(&self, caller: &Caller, warehouse: &NewWarehouse) -> Result<()> {
        self.post_authorized(WAREHOUSE_CREATE_PATH, caller, warehouse)
    }

    fn invite_app_admin(&self, caller: &Caller, invite: &AppAdminInvite) -> Result<()> {
        self.post_authorized(APP_ADMIN_INVITE_PATH, caller, invite)
    }

    fn invite_warehouse_admin(&self, caller: &Caller, invite: &WarehouseAdminInvite) -> Result<()> {
        self.post_authorized(WAREHOUSE_ADMIN_INVITE_PATH, caller, invite)
    }
}

// =============================================================================
// Tests
// =============================================================================
