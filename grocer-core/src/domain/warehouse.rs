//! Warehouse creation payload

use serde::Serialize;

use super::account::LocationForm;
use super::validation::{self, ValidationErrors};

/// Warehouse creation request body (address flattened onto the record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    pub ware_house_email: String,
    pub ware_house_contact_number: u64,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub country: String,
    pub is_primary: bool,
    pub state: String,
    pub pin_code: u32,
}

/// Warehouse fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseForm {
    pub email: String,
    pub contact_number: String,
    /// Collected for the admin invitation flow; the backend does not take it
    pub warehouse_admin_email: String,
    pub location: LocationForm,
}

impl Default for WarehouseForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            contact_number: String::new(),
            warehouse_admin_email: String::new(),
            location: LocationForm {
                country: String::new(),
                is_primary: false,
                ..LocationForm::default()
            },
        }
    }
}

impl WarehouseForm {
    pub fn validate(&self) -> Result<NewWarehouse, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = validation::email(&mut errors, "email", &self.email);
        let contact = validation::phone_number(
            &mut errors,
            "contactNumber",
            &self.contact_number,
            6,
            15,
        );
        validation::email(&mut errors, "warehouseAdminEmail", &self.warehouse_admin_email);

        let location = match self.location.validate() {
            Ok(location) => Some(location),
            Err(location_errors) => {
                errors.extend(location_errors);
                None
            }
        };

        match (email, contact, location) {
            (Some(email), Some(contact), Some(location)) if errors.is_empty() => {
                Ok(NewWarehouse {
                    ware_house_email: email,
                    ware_house_contact_number: contact,
                    address_line1: location.address_line1,
                    address_line2: location.address_line2,
                    address_line3: location.address_line3,
                    city: location.city,
                    country: location.country,
                    is_primary: location.is_primary,
                    state: location.state,
                    pin_code: location.pin_code,
                })
            }
            _ => Err(errors),
        }
    }
}
