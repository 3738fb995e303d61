//! Administrator invitation payloads

use serde::Serialize;

use super::user::UserType;
use super::validation::{self, ValidationErrors};

/// Status assigned to freshly invited administrators
pub const INVITED_STATUS: &str = "INACTIVE";

/// App-admin invitation request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAdminInvite {
    pub user_name: String,
    pub email: String,
    pub phone_number: u64,
    pub user_type: UserType,
    pub status: String,
}

/// App-admin invitation fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppAdminInviteForm {
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_type: UserType,
}

impl Default for AppAdminInviteForm {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            user_type: UserType::ZeptoAppAdmin,
        }
    }
}

impl AppAdminInviteForm {
    pub fn validate(&self) -> Result<AppAdminInvite, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let user_name = self.user_name.trim();
        if user_name.chars().count() < 2 {
            errors.add("userName", "Username must be at least 2 characters");
        }
        let email = validation::email(&mut errors, "email", &self.email);
        let phone = validation::phone_number(&mut errors, "phoneNumber", &self.phone_number, 10, 19);
        if !self.user_type.is_administrative() {
            errors.add(
                "userType",
                format!("{} is not an administrative role", self.user_type),
            );
        }

        match (email, phone) {
            (Some(email), Some(phone_number)) if errors.is_empty() => Ok(AppAdminInvite {
                user_name: user_name.to_string(),
                email,
                phone_number,
                user_type: self.user_type,
                status: INVITED_STATUS.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Warehouse-admin invitation request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseAdminInvite {
    pub user_name: String,
    pub email: String,
    pub phone_number: u64,
}

/// Warehouse-admin invitation fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehouseAdminInviteForm {
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
}

impl WarehouseAdminInviteForm {
    pub fn validate(&self) -> Result<WarehouseAdminInvite, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let user_name = validation::required(&mut errors, "userName", &self.user_name, "Name is required");
        if let Some(name) = user_name {
            if name.chars().count() > 100 {
                errors.add("userName", "Name must be less than 100 characters");
            }
        }
        let email = validation::email(&mut errors, "email", &self.email);
        if let Some(e) = &email {
            if e.len() > 255 {
                errors.add("email", "Email must be less than 255 characters");
            }
        }
        let phone = validation::phone_number(&mut errors, "phoneNumber", &self.phone_number, 10, 15);

        match (user_name, email, phone) {
            (Some(user_name), Some(email), Some(phone_number)) if errors.is_empty() => {
                Ok(WarehouseAdminInvite {
                    user_name: user_name.to_string(),
                    email,
                    phone_number,
                })
            }
            _ => Err(errors),
        }
    }
}
