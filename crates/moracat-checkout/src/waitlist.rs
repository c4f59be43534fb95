//! Waitlist and newsletter form validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const KSA_PHONE: &str = r"^(\+966|966|05|5)[0-9]{8}$";
const EMAIL: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Waitlist sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub number_of_pets: i64,
}

/// First rule a form violated
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validates lead and newsletter forms
#[derive(Debug, Clone)]
pub struct LeadValidator {
    phone: Regex,
    email: Regex,
}

impl LeadValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            phone: Regex::new(KSA_PHONE)?,
            email: Regex::new(EMAIL)?,
        })
    }

    /// Check a waitlist form; rules are checked in field order
    pub fn validate(&self, form: &LeadForm) -> Result<(), ValidationError> {
        let name_len = form.name.chars().count();
        if name_len < 2 {
            return Err(ValidationError::new("name", "Name must be at least 2 characters"));
        }
        if name_len > 50 {
            return Err(ValidationError::new("name", "Name must be less than 50 characters"));
        }

        self.validate_email(&form.email)?;

        if !self.phone.is_match(&form.phone) {
            return Err(ValidationError::new(
                "phone",
                "Please enter a valid KSA phone number (e.g., 05XXXXXXXX)",
            ));
        }

        if form.number_of_pets < 1 {
            return Err(ValidationError::new("numberOfPets", "You must have at least 1 cat"));
        }
        if form.number_of_pets > 20 {
            return Err(ValidationError::new("numberOfPets", "Maximum 20 cats allowed"));
        }

        Ok(())
    }

    /// Check a newsletter sign-up address
    pub fn validate_email(&self, email: &str) -> Result<(), ValidationError> {
        if self.email.is_match(email) {
            Ok(())
        } else {
            Err(ValidationError::new("email", "Please enter a valid email address"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LeadForm {
        LeadForm {
            name: "Sara".into(),
            email: "sara@example.com".into(),
            phone: "0512345678".into(),
            number_of_pets: 2,
        }
    }

    #[test]
    fn test_valid_form() {
        let validator = LeadValidator::new().unwrap();
        assert_eq!(validator.validate(&form()), Ok(()));
    }

    #[test]
    fn test_phone_formats() {
        let validator = LeadValidator::new().unwrap();
        for phone in ["+96651234567", "96651234567", "0512345678", "512345678"] {
            let f = LeadForm { phone: phone.into(), ..form() };
            assert!(validator.validate(&f).is_ok(), "{}", phone);
        }
        for phone in ["+966512345678", "051234567", "+9665123456", "0612345678a", "+1 555 0100"] {
            let f = LeadForm { phone: phone.into(), ..form() };
            assert_eq!(validator.validate(&f).unwrap_err().field, "phone", "{}", phone);
        }
    }

    #[test]
    fn test_first_error_wins() {
        let validator = LeadValidator::new().unwrap();
        let f = LeadForm {
            name: "S".into(),
            email: "nope".into(),
            ..form()
        };
        assert_eq!(validator.validate(&f).unwrap_err().field, "name");
    }

    #[test]
    fn test_name_counts_characters() {
        let validator = LeadValidator::new().unwrap();
        let f = LeadForm { name: "سا".into(), ..form() };
        assert!(validator.validate(&f).is_ok());

        let f = LeadForm { name: "a".repeat(51), ..form() };
        assert_eq!(
            validator.validate(&f).unwrap_err().message,
            "Name must be less than 50 characters"
        );
    }

    #[test]
    fn test_pet_bounds() {
        let validator = LeadValidator::new().unwrap();
        for (pets, ok) in [(0, false), (1, true), (20, true), (21, false)] {
            let f = LeadForm { number_of_pets: pets, ..form() };
            assert_eq!(validator.validate(&f).is_ok(), ok, "{}", pets);
        }
    }

    #[test]
    fn test_form_json_shape() {
        let f: LeadForm = serde_json::from_str(
            r#"{"name":"Sara","email":"sara@example.com","phone":"0512345678","numberOfPets":3}"#,
        )
        .unwrap();
        assert_eq!(f.number_of_pets, 3);
        assert_eq!(
            LeadValidator::new().unwrap().validate_email("a b@c.d").unwrap_err().field,
            "email"
        );
    }
}
