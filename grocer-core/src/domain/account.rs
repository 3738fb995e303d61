//! Account payloads: sign in, sign up and postal locations

use serde::{Deserialize, Serialize};

use super::user::{User, UserType};
use super::validation::{self, ValidationErrors};

/// Sign-in request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::required(&mut errors, "email", &self.email, "Email is required");
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result(|| ())
    }
}

/// Successful sign-in response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthGrant {
    pub token: String,
    pub user: User,
}

/// Postal address as sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: u32,
    pub is_primary: bool,
}

/// Address fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationForm {
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: String,
    pub is_primary: bool,
}

impl Default for LocationForm {
    fn default() -> Self {
        Self {
            address_line1: String::new(),
            address_line2: String::new(),
            address_line3: String::new(),
            city: String::new(),
            state: String::new(),
            country: "India".to_string(),
            pin_code: String::new(),
            is_primary: true,
        }
    }
}

impl LocationForm {
    pub fn validate(&self) -> Result<Location, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let line1 = validation::required(
            &mut errors,
            "addressLine1",
            &self.address_line1,
            "Address line 1 is required",
        );
        let city = validation::required(&mut errors, "city", &self.city, "City is required");
        let state = validation::required(&mut errors, "state", &self.state, "State is required");
        let country =
            validation::required(&mut errors, "country", &self.country, "Country is required");
        let pin = validation::pin_code(&mut errors, "pinCode", &self.pin_code);

        match (line1, city, state, country, pin) {
            (Some(line1), Some(city), Some(state), Some(country), Some(pin_code))
                if errors.is_empty() =>
            {
                Ok(Location {
                    address_line1: line1.to_string(),
                    address_line2: self.address_line2.trim().to_string(),
                    address_line3: self.address_line3.trim().to_string(),
                    city: city.to_string(),
                    state: state.to_string(),
                    country: country.to_string(),
                    pin_code,
                    is_primary: self.is_primary,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Account creation request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: u64,
    pub user_type: UserType,
    pub location: Location,
}

/// Two-step sign-up form: account details, then address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub user_type: UserType,
    pub location: LocationForm,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            phone_number: String::new(),
            user_type: UserType::Consumer,
            location: LocationForm::default(),
        }
    }
}

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 8;

impl SignupForm {
    /// First step: personal details
    pub fn validate_account(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::required(&mut errors, "userName", &self.user_name, "Username is required");
        validation::email(&mut errors, "email", &self.email);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords don't match");
        }

        validation::phone_number(&mut errors, "phoneNumber", &self.phone_number, 10, 10);

        if self.user_type != UserType::Consumer {
            errors.add("userType", "Only consumer accounts can sign up");
        }
        errors.into_result(|| ())
    }

    /// Both steps; yields the request body
    pub fn validate(&self) -> Result<SignupRequest, ValidationErrors> {
        self.validate_account()?;
        let location = self.location.validate()?;
        let phone_number = self
            .phone_number
            .trim()
            .parse()
            .map_err(|_| {
                let mut errors = ValidationErrors::new();
                errors.add("phoneNumber", "Invalid phone number");
                errors
            })?;

        Ok(SignupRequest {
            user_name: self.user_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone_number,
            user_type: self.user_type,
            location,
        })
    }
}
