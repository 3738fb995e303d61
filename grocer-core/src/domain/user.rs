//! User domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of principal kinds known to the marketplace backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Consumer,
    ZeptoAppAdmin,
    System,
    Maint,
    WarehouseAdmin,
    DeliveryPartner,
}

impl UserType {
    pub const ALL: [UserType; 6] = [
        UserType::Consumer,
        UserType::ZeptoAppAdmin,
        UserType::System,
        UserType::Maint,
        UserType::WarehouseAdmin,
        UserType::DeliveryPartner,
    ];

    /// Wire name, e.g. `ZEPTO_APP_ADMIN`
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Consumer => "CONSUMER",
            UserType::ZeptoAppAdmin => "ZEPTO_APP_ADMIN",
            UserType::System => "SYSTEM",
            UserType::Maint => "MAINT",
            UserType::WarehouseAdmin => "WAREHOUSE_ADMIN",
            UserType::DeliveryPartner => "DELIVERY_PARTNER",
        }
    }

    /// Roles an app-admin invitation may grant
    pub fn is_administrative(&self) -> bool {
        matches!(
            self,
            UserType::ZeptoAppAdmin | UserType::System | UserType::Maint
        )
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        UserType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = UserType::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown user type '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

/// Represents an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub phone_number: u64,
    pub user_type: UserType,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: "u1".to_string(),
            user_name: "alice".to_string(),
            email: "a@x.com".to_string(),
            phone_number: 5551234567,
            user_type: UserType::Consumer,
            status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn test_user_wire_format_is_camel_case() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["userName"], "alice");
        assert_eq!(json["phoneNumber"], 5551234567u64);
        assert_eq!(json["userType"], "CONSUMER");
    }

    #[test]
    fn test_user_parses_backend_record() {
        let raw = r#"{
            "id": "5901634f-a4f5-4160-ade4-62321bc8c131",
            "userName": "ops",
            "email": "ops@example.com",
            "phoneNumber": 9876543210,
            "userType": "ZEPTO_APP_ADMIN",
            "status": "INACTIVE"
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.user_type, UserType::ZeptoAppAdmin);
        assert_eq!(user.status, "INACTIVE");
    }

    #[test]
    fn test_unknown_user_type_is_rejected() {
        let raw = r#"{"id":"1","userName":"x","email":"x@y.z","phoneNumber":1,"userType":"PREMIUM","status":"ACTIVE"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }

    #[test]
    fn test_user_type_from_str_is_lenient_about_case_and_dashes() {
        assert_eq!("warehouse-admin".parse::<UserType>().unwrap(), UserType::WarehouseAdmin);
        assert_eq!("MAINT".parse::<UserType>().unwrap(), UserType::Maint);
        assert!("manager".parse::<UserType>().is_err());
    }

    #[test]
    fn test_administrative_roles() {
        assert!(UserType::ZeptoAppAdmin.is_administrative());
        assert!(UserType::Maint.is_administrative());
        assert!(!UserType::Consumer.is_administrative());
        assert!(!UserType::DeliveryPartner.is_administrative());
    }
}
