//! Admissions form intake: the service layer over the collection store.
//!
//! Each service is a stateless facade holding an `Arc<CollectionStore>`.
//! Multiple services sharing the same store see the same data; cloning a
//! service is an `Arc` clone. Services validate field data before handing
//! it to the store (the store performs no validation itself) and translate
//! raw records into domain outcomes.
//!
//! Transport wiring (HTTP routing, response envelopes) is out of scope;
//! these are the typed request/response functions a transport would wrap.

pub mod account;
pub mod contact;
pub mod enrollment;
pub mod error;
pub mod validation;

pub use account::{AccountService, LoginRequest, NewUser};
pub use contact::{
    ContactFilter, ContactForm, ContactPriority, ContactService, ContactStatus, ContactSummary,
};
pub use enrollment::{
    EnrollmentFilter, EnrollmentForm, EnrollmentService, EnrollmentStatus, EnrollmentSummary,
};
pub use error::{Result, ServiceError};

/// Single-key find criteria.
pub(crate) fn criteria(key: &str, value: impl Into<serde_json::Value>) -> admit_core::Fields {
    let mut map = admit_core::Fields::new();
    map.insert(key.to_string(), value.into());
    map
}

/// Collection names used by the admissions services.
///
/// The store itself is collection-name-agnostic; these are the three
/// collections this backend uses.
pub mod collections {
    /// Registered user accounts
    pub const USERS: &str = "users";
    /// Contact-form messages
    pub const CONTACTS: &str = "contacts";
    /// Enrollment applications
    pub const ENROLLMENTS: &str = "enrollments";
}
