//! Field-level form validation
//!
//! Forms collect every problem before reporting so the user sees all of
//! them at once, keyed by the field they belong to.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Ordered list of (field, message) problems
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Append another set of errors, e.g. from a nested form
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Require a non-blank value; returns the trimmed text
pub fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: &'a str,
    message: &str,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
        None
    } else {
        Some(trimmed)
    }
}

/// Required e-mail address
pub fn email(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    let value = required(errors, field, value, "Email is required")?;
    if is_valid_email(value) {
        Some(value.to_string())
    } else {
        errors.add(field, "Invalid email format");
        None
    }
}

/// Required phone number made of exactly `min..=max` digits
pub fn phone_number(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Option<u64> {
    let value = required(errors, field, value, "Phone number is required")?;
    if !is_digits(value) {
        errors.add(field, "Phone number must contain only digits");
        return None;
    }
    if value.len() < min {
        errors.add(field, format!("Phone number must be at least {} digits", min));
        return None;
    }
    if value.len() > max {
        errors.add(field, format!("Phone number must be at most {} digits", max));
        return None;
    }
    match value.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Invalid phone number");
            None
        }
    }
}

/// Required Indian-style six digit PIN code
pub fn pin_code(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<u32> {
    let value = required(errors, field, value, "PIN code is required")?;
    if value.len() == 6 && is_digits(value) {
        value.parse().ok()
    } else {
        errors.add(field, "Invalid PIN code");
        None
    }
}

/// Required non-negative decimal amount
pub fn non_negative_decimal(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    label: &str,
) -> Option<Decimal> {
    let value = required(errors, field, value, &format!("{} is required", label))?;
    match value.parse::<Decimal>() {
        Ok(d) if d.is_sign_negative() && !d.is_zero() => {
            errors.add(field, format!("{} cannot be negative", label));
            None
        }
        Ok(d) => Some(d),
        Err(_) => {
            errors.add(field, format!("{} must be a number", label));
            None
        }
    }
}

/// Non-negative whole number; blank yields `default` when one is given
pub fn non_negative_integer(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    label: &str,
    default: Option<u32>,
) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return match default {
            Some(d) => Some(d),
            None => {
                errors.add(field, format!("{} is required", label));
                None
            }
        };
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => {
            errors.add(field, format!("{} cannot be negative", label));
            None
        }
        Ok(n) => match u32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                errors.add(field, format!("{} is too large", label));
                None
            }
        },
        Err(_) => {
            errors.add(field, format!("{} must be a whole number", label));
            None
        }
    }
}
