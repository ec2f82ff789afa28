//! Enrollment applications: intake, review, and reporting.

use crate::collections::ENROLLMENTS;
use crate::error::{Result, ServiceError};
use crate::{criteria, validation};
use admit_core::{Fields, Record, RecordId};
use admit_store::CollectionStore;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Enrollment application form data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentForm {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    // Contact information
    pub phone: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub department: String,
    // Program information
    pub program: String,
    pub referral_source: String,
}

impl EnrollmentForm {
    fn validate(&self) -> Result<()> {
        validation::person_name("firstName", &self.first_name)?;
        validation::person_name("lastName", &self.last_name)?;
        validation::require("documentType", &self.document_type)?;
        validation::require("documentNumber", &self.document_number)?;
        validation::require("gender", &self.gender)?;
        validation::phone("phone", &self.phone)?;
        validation::phone("mobile", &self.mobile)?;
        validation::email("email", &self.email)?;
        validation::require("address", &self.address)?;
        validation::require("city", &self.city)?;
        validation::require("department", &self.department)?;
        validation::require("program", &self.program)?;
        validation::require("referralSource", &self.referral_source)?;
        validation::minimum_age("dateOfBirth", self.date_of_birth)?;
        Ok(())
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("firstName".to_string(), json!(self.first_name));
        fields.insert("lastName".to_string(), json!(self.last_name));
        fields.insert("documentType".to_string(), json!(self.document_type));
        fields.insert("documentNumber".to_string(), json!(self.document_number));
        fields.insert(
            "dateOfBirth".to_string(),
            json!(self.date_of_birth.to_string()),
        );
        fields.insert("gender".to_string(), json!(self.gender));
        fields.insert("phone".to_string(), json!(self.phone));
        fields.insert("mobile".to_string(), json!(self.mobile));
        fields.insert("email".to_string(), json!(self.email));
        fields.insert("address".to_string(), json!(self.address));
        fields.insert("city".to_string(), json!(self.city));
        fields.insert("department".to_string(), json!(self.department));
        fields.insert("program".to_string(), json!(self.program));
        fields.insert("referralSource".to_string(), json!(self.referral_source));
        fields
    }
}

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(EnrollmentStatus::Pending),
            "approved" => Ok(EnrollmentStatus::Approved),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            other => Err(ServiceError::invalid(
                "status",
                format!("unknown status '{other}'"),
            )),
        }
    }
}

/// Optional filter for listing applications.
#[derive(Debug, Clone)]
pub enum EnrollmentFilter {
    Status(EnrollmentStatus),
    Program(String),
    City(String),
}

/// Counts for the enrollment diagnostics summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub by_program: BTreeMap<String, usize>,
    pub by_city: BTreeMap<String, usize>,
}

/// Enrollment application intake and review over the shared store.
#[derive(Debug, Clone)]
pub struct EnrollmentService {
    store: Arc<CollectionStore>,
}

impl EnrollmentService {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Accept an enrollment application.
    ///
    /// Validates the form (including the minimum-age rule), rejects a
    /// duplicate document number with [`ServiceError::Conflict`], assigns
    /// pending status and a generated application number, and returns the
    /// stored record.
    pub fn apply(&self, form: EnrollmentForm) -> Result<Record> {
        form.validate()?;

        let existing = self.store.find(
            ENROLLMENTS,
            &criteria("documentNumber", form.document_number.as_str()),
        )?;
        if !existing.is_empty() {
            return Err(ServiceError::Conflict(format!(
                "an application already exists for document {}",
                form.document_number
            )));
        }

        let mut fields = form.into_fields();
        fields.insert(
            "status".to_string(),
            json!(EnrollmentStatus::Pending.as_str()),
        );
        fields.insert(
            "applicationNumber".to_string(),
            json!(format!("ENR-{}", Utc::now().timestamp_millis())),
        );

        let record = self.store.create(ENROLLMENTS, fields)?;
        info!(id = %record.id, "enrollment application received");
        Ok(record)
    }

    /// Applications, optionally filtered, newest first.
    pub fn list(&self, filter: Option<EnrollmentFilter>) -> Result<Vec<Record>> {
        let mut records = match filter {
            Some(EnrollmentFilter::Status(status)) => self
                .store
                .find(ENROLLMENTS, &criteria("status", status.as_str()))?,
            Some(EnrollmentFilter::Program(program)) => self
                .store
                .find(ENROLLMENTS, &criteria("program", program.as_str()))?,
            Some(EnrollmentFilter::City(city)) => self
                .store
                .find(ENROLLMENTS, &criteria("city", city.as_str()))?,
            None => self.store.get_all(ENROLLMENTS)?,
        };
        // The store guarantees no ordering; recency order is applied here.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// One application by id.
    pub fn get(&self, id: RecordId) -> Result<Record> {
        Ok(self.store.get(ENROLLMENTS, id)?)
    }

    /// The application for a document number.
    pub fn find_by_document(&self, document_number: &str) -> Result<Record> {
        validation::require("documentNumber", document_number)?;
        let mut matches = self
            .store
            .find(ENROLLMENTS, &criteria("documentNumber", document_number))?;
        matches.pop().ok_or_else(|| {
            ServiceError::NotFound(format!(
                "no application found for document {document_number}"
            ))
        })
    }

    /// Merge partial fields over an application.
    pub fn update(&self, id: RecordId, partial: Fields) -> Result<Record> {
        Ok(self.store.update(ENROLLMENTS, id, partial)?)
    }

    /// Move an application to a new review status, with optional notes.
    pub fn set_status(
        &self,
        id: RecordId,
        status: EnrollmentStatus,
        notes: Option<String>,
    ) -> Result<Record> {
        let mut partial = criteria("status", status.as_str());
        if let Some(notes) = notes {
            partial.insert("notes".to_string(), json!(notes));
        }
        let record = self.store.update(ENROLLMENTS, id, partial)?;
        info!(id = %id, status = status.as_str(), "application status changed");
        Ok(record)
    }

    /// Remove an application.
    pub fn delete(&self, id: RecordId) -> Result<RecordId> {
        Ok(self.store.delete(ENROLLMENTS, id)?)
    }

    /// Counts by status, program, and city.
    pub fn summary(&self) -> Result<EnrollmentSummary> {
        let all = self.store.get_all(ENROLLMENTS)?;
        let by_status = |status: EnrollmentStatus| {
            all.iter()
                .filter(|r| r.field_str("status") == Some(status.as_str()))
                .count()
        };

        let mut by_program: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_city: BTreeMap<String, usize> = BTreeMap::new();
        for record in &all {
            if let Some(program) = record.field_str("program") {
                *by_program.entry(program.to_string()).or_default() += 1;
            }
            if let Some(city) = record.field_str("city") {
                *by_city.entry(city.to_string()).or_default() += 1;
            }
        }

        Ok(EnrollmentSummary {
            total: all.len(),
            pending: by_status(EnrollmentStatus::Pending),
            approved: by_status(EnrollmentStatus::Approved),
            rejected: by_status(EnrollmentStatus::Rejected),
            by_program,
            by_city,
        })
    }
}
