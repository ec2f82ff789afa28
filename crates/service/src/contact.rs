//! Contact messages: intake and triage.

use crate::collections::CONTACTS;
use crate::error::Result;
use crate::{criteria, validation};
use admit_core::{Fields, Record, RecordId};
use admit_store::CollectionStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Minimum length for the message body.
const MIN_MESSAGE_LEN: usize = 10;

/// Contact form data.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    fn validate(&self) -> Result<()> {
        validation::person_name("name", &self.name)?;
        validation::email("email", &self.email)?;
        validation::phone("phone", &self.phone)?;
        validation::require("subject", &self.subject)?;
        validation::min_length("message", &self.message, MIN_MESSAGE_LEN)?;
        Ok(())
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), json!(self.name));
        fields.insert("email".to_string(), json!(self.email));
        fields.insert("phone".to_string(), json!(self.phone));
        fields.insert("subject".to_string(), json!(self.subject));
        fields.insert("message".to_string(), json!(self.message));
        fields.insert("status".to_string(), json!(ContactStatus::Pending.as_str()));
        fields.insert(
            "priority".to_string(),
            json!(ContactPriority::Normal.as_str()),
        );
        fields
    }
}

/// Triage status of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Read,
    Answered,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Read => "read",
            ContactStatus::Answered => "answered",
        }
    }
}

/// Handling priority of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPriority {
    Low,
    Normal,
    High,
}

impl ContactPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPriority::Low => "low",
            ContactPriority::Normal => "normal",
            ContactPriority::High => "high",
        }
    }
}

/// Optional filter for listing contact messages.
#[derive(Debug, Clone, Copy)]
pub enum ContactFilter {
    Status(ContactStatus),
    Priority(ContactPriority),
}

/// Counts for the contact diagnostics summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSummary {
    pub total: usize,
    pub pending: usize,
    pub read: usize,
    pub answered: usize,
    pub low_priority: usize,
    pub normal_priority: usize,
    pub high_priority: usize,
}

/// Contact message intake over the shared store.
#[derive(Debug, Clone)]
pub struct ContactService {
    store: Arc<CollectionStore>,
}

impl ContactService {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Accept a contact message.
    ///
    /// New messages start as pending with normal priority.
    pub fn submit(&self, form: ContactForm) -> Result<Record> {
        form.validate()?;
        let record = self.store.create(CONTACTS, form.into_fields())?;
        info!(id = %record.id, "contact message received");
        Ok(record)
    }

    /// Messages, optionally filtered by status or priority.
    pub fn list(&self, filter: Option<ContactFilter>) -> Result<Vec<Record>> {
        let records = match filter {
            Some(ContactFilter::Status(status)) => self
                .store
                .find(CONTACTS, &criteria("status", status.as_str()))?,
            Some(ContactFilter::Priority(priority)) => self
                .store
                .find(CONTACTS, &criteria("priority", priority.as_str()))?,
            None => self.store.get_all(CONTACTS)?,
        };
        Ok(records)
    }

    /// One message by id.
    pub fn get(&self, id: RecordId) -> Result<Record> {
        Ok(self.store.get(CONTACTS, id)?)
    }

    /// Merge partial fields over a message (status, priority, notes, ...).
    pub fn update(&self, id: RecordId, partial: Fields) -> Result<Record> {
        Ok(self.store.update(CONTACTS, id, partial)?)
    }

    /// Remove a message.
    pub fn delete(&self, id: RecordId) -> Result<RecordId> {
        Ok(self.store.delete(CONTACTS, id)?)
    }

    /// Counts by status and priority.
    pub fn summary(&self) -> Result<ContactSummary> {
        let all = self.store.get_all(CONTACTS)?;
        let by_status = |status: ContactStatus| {
            all.iter()
                .filter(|r| r.field_str("status") == Some(status.as_str()))
                .count()
        };
        let by_priority = |priority: ContactPriority| {
            all.iter()
                .filter(|r| r.field_str("priority") == Some(priority.as_str()))
                .count()
        };
        Ok(ContactSummary {
            total: all.len(),
            pending: by_status(ContactStatus::Pending),
            read: by_status(ContactStatus::Read),
            answered: by_status(ContactStatus::Answered),
            low_priority: by_priority(ContactPriority::Low),
            normal_priority: by_priority(ContactPriority::Normal),
            high_priority: by_priority(ContactPriority::High),
        })
    }
}
