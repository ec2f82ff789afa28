//! Regex-based field validators for form intake.
//!
//! Each check returns `Err(ServiceError::Validation { .. })` naming the
//! offending field. Patterns mirror the forms the site actually serves:
//! names accept Spanish accented letters, phone numbers accept the usual
//! separators.

use crate::error::{Result, ServiceError};
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9+\s()\-]+$").unwrap());

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").unwrap());

/// Minimum password length for login.
pub const MIN_PASSWORD_LOGIN: usize = 6;
/// Minimum password length for registration.
pub const MIN_PASSWORD_REGISTER: usize = 8;
/// Minimum applicant age for enrollment.
pub const MIN_ENROLLMENT_AGE: i32 = 18;

/// A field must be non-empty after trimming.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid(field, "is required"));
    }
    Ok(())
}

/// Email: required, basic user@host.tld shape.
pub fn email(field: &'static str, value: &str) -> Result<()> {
    require(field, value)?;
    if !EMAIL_RE.is_match(value) {
        return Err(ServiceError::invalid(field, "is not a valid email address"));
    }
    Ok(())
}

/// Phone: digits and separators only, at least 10 characters.
pub fn phone(field: &'static str, value: &str) -> Result<()> {
    require(field, value)?;
    if !PHONE_RE.is_match(value) || value.len() < 10 {
        return Err(ServiceError::invalid(field, "is not a valid phone number"));
    }
    Ok(())
}

/// Person name: letters (including accented) and spaces, length >= 2.
pub fn person_name(field: &'static str, value: &str) -> Result<()> {
    require(field, value)?;
    if !NAME_RE.is_match(value) || value.trim().chars().count() < 2 {
        return Err(ServiceError::invalid(field, "must be letters and spaces only"));
    }
    Ok(())
}

/// Password: required, minimum length.
pub fn password(field: &'static str, value: &str, min_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(ServiceError::invalid(field, "is required"));
    }
    if value.chars().count() < min_len {
        return Err(ServiceError::invalid(
            field,
            format!("must be at least {min_len} characters"),
        ));
    }
    Ok(())
}

/// Free-text field with a minimum length after trimming.
pub fn min_length(field: &'static str, value: &str, min_len: usize) -> Result<()> {
    require(field, value)?;
    if value.trim().chars().count() < min_len {
        return Err(ServiceError::invalid(
            field,
            format!("must be at least {min_len} characters"),
        ));
    }
    Ok(())
}

/// Applicant must be at least [`MIN_ENROLLMENT_AGE`] years old today.
pub fn minimum_age(field: &'static str, date_of_birth: NaiveDate) -> Result<()> {
    let today = Utc::now().date_naive();
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    if age < MIN_ENROLLMENT_AGE {
        return Err(ServiceError::invalid(
            field,
            format!("applicant must be at least {MIN_ENROLLMENT_AGE} years old"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("subject", "hello").is_ok());
        assert!(require("subject", "").is_err());
        assert!(require("subject", "   ").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", "a@b.co").is_ok());
        assert!(email("email", "").is_err());
        assert!(email("email", "not-an-email").is_err());
        assert!(email("email", "a b@example.com").is_err());
        assert!(email("email", "ana@example").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(phone("phone", "+57 (301) 555-1234").is_ok());
        assert!(phone("phone", "3015551234").is_ok());
        assert!(phone("phone", "12345").is_err(), "too short");
        assert!(phone("phone", "301-555x1234").is_err(), "bad character");
        assert!(phone("phone", "").is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(person_name("name", "Ana María").is_ok());
        assert!(person_name("name", "Ñoño").is_ok());
        assert!(person_name("name", "A").is_err(), "too short");
        assert!(person_name("name", "Ana123").is_err(), "digits");
        assert!(person_name("name", "").is_err());
    }

    #[test]
    fn test_password() {
        assert!(password("password", "secret1", 6).is_ok());
        assert!(password("password", "short", 6).is_err());
        assert!(password("password", "", 6).is_err());
    }

    #[test]
    fn test_min_length() {
        assert!(min_length("message", "long enough text", 10).is_ok());
        assert!(min_length("message", "too short", 10).is_err());
    }

    #[test]
    fn test_minimum_age() {
        let today = Utc::now().date_naive();
        let adult = NaiveDate::from_ymd_opt(today.year() - 30, 1, 1).unwrap();
        let minor = NaiveDate::from_ymd_opt(today.year() - 17, 1, 1).unwrap();
        assert!(minimum_age("dateOfBirth", adult).is_ok());
        assert!(minimum_age("dateOfBirth", minor).is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = email("email", "nope").unwrap_err();
        match err {
            ServiceError::Validation { field, .. } => assert_eq!(field, "email"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
