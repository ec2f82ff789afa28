//! User accounts: registration and login.
//!
//! Passwords are stored and compared as given (no hashing); that is the
//! observed behavior of the system this replaces and hardening it is an
//! explicit non-goal. Every record leaving this service has the password
//! field redacted.

use crate::collections::USERS;
use crate::error::{Result, ServiceError};
use crate::{criteria, validation};
use admit_core::{Fields, Record, RecordId};
use admit_store::CollectionStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Registration form data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl NewUser {
    fn validate(&self) -> Result<()> {
        validation::person_name("firstName", &self.first_name)?;
        validation::person_name("lastName", &self.last_name)?;
        validation::email("email", &self.email)?;
        validation::phone("phone", &self.phone)?;
        validation::password("password", &self.password, validation::MIN_PASSWORD_REGISTER)?;
        if self.password != self.confirm_password {
            return Err(ServiceError::invalid("confirmPassword", "passwords do not match"));
        }
        if !self.accept_terms {
            return Err(ServiceError::invalid(
                "acceptTerms",
                "terms and conditions must be accepted",
            ));
        }
        Ok(())
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("firstName".to_string(), json!(self.first_name));
        fields.insert("lastName".to_string(), json!(self.last_name));
        fields.insert("email".to_string(), json!(self.email));
        fields.insert("phone".to_string(), json!(self.phone));
        fields.insert("password".to_string(), json!(self.password));
        fields.insert("status".to_string(), json!("active"));
        fields
    }
}

/// Login form data.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account registration and login over the shared store.
///
/// Stateless facade: clones share the same `Arc<CollectionStore>`.
#[derive(Debug, Clone)]
pub struct AccountService {
    store: Arc<CollectionStore>,
}

impl AccountService {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Validates the form, rejects an already-registered email with
    /// [`ServiceError::Conflict`], and returns the stored record with the
    /// password redacted.
    pub fn register(&self, user: NewUser) -> Result<Record> {
        user.validate()?;

        let existing = self.store.find(USERS, &criteria("email", user.email.as_str()))?;
        if !existing.is_empty() {
            return Err(ServiceError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        let record = self.store.create(USERS, user.into_fields())?;
        info!(id = %record.id, "user registered");
        Ok(redact(record))
    }

    /// Log a user in.
    ///
    /// Unknown email fails with [`ServiceError::NotFound`]; a wrong
    /// password fails with [`ServiceError::InvalidCredentials`]. Returns
    /// the account record with the password redacted.
    pub fn login(&self, request: LoginRequest) -> Result<Record> {
        validation::email("email", &request.email)?;
        validation::password("password", &request.password, validation::MIN_PASSWORD_LOGIN)?;

        let mut matches = self
            .store
            .find(USERS, &criteria("email", request.email.as_str()))?;
        let record = matches.pop().ok_or_else(|| {
            ServiceError::NotFound(format!("no account registered for {}", request.email))
        })?;

        if record.field_str("password") != Some(request.password.as_str()) {
            return Err(ServiceError::InvalidCredentials);
        }

        info!(id = %record.id, "login succeeded");
        Ok(redact(record))
    }

    /// Whether an account with this email exists.
    pub fn email_exists(&self, email: &str) -> Result<bool> {
        validation::require("email", email)?;
        Ok(!self.store.find(USERS, &criteria("email", email))?.is_empty())
    }

    /// All registered users, passwords redacted.
    pub fn list_users(&self) -> Result<Vec<Record>> {
        Ok(self
            .store
            .get_all(USERS)?
            .into_iter()
            .map(redact)
            .collect())
    }

    /// One user by id, password redacted.
    pub fn get_user(&self, id: RecordId) -> Result<Record> {
        Ok(redact(self.store.get(USERS, id)?))
    }

    /// Remove an account.
    pub fn delete_user(&self, id: RecordId) -> Result<RecordId> {
        Ok(self.store.delete(USERS, id)?)
    }
}

/// Strip the stored password from an outgoing record.
fn redact(mut record: Record) -> Record {
    record.fields.remove("password");
    record
}
