//! admitdb: an embedded in-memory admissions datastore.
//!
//! The pieces:
//! - [`CollectionStore`]: serialized CRUD and query access to named
//!   in-memory collections, with bounded-wait mutual exclusion per
//!   collection (`admit-store`)
//! - [`Record`] and friends: the stored data model (`admit-core`)
//! - the admissions services: registration/login, contact messages, and
//!   enrollment applications over a shared store (`admit-service`)
//!
//! # Quick start
//!
//! ```
//! use admitdb::{AccountService, CollectionStore, NewUser};
//! use std::sync::Arc;
//!
//! let store = Arc::new(CollectionStore::new());
//! let accounts = AccountService::new(Arc::clone(&store));
//!
//! let user = accounts.register(NewUser {
//!     first_name: "Ana".into(),
//!     last_name: "García".into(),
//!     email: "ana@example.com".into(),
//!     phone: "3015551234".into(),
//!     password: "supersecret".into(),
//!     confirm_password: "supersecret".into(),
//!     accept_terms: true,
//! }).unwrap();
//!
//! assert!(user.field("password").is_none());
//! ```

// ============================================================================
// Data model and errors
// ============================================================================

pub use admit_core::{Fields, Record, RecordId, StoreConfig, StoreError, DEFAULT_LOCK_TIMEOUT};

// ============================================================================
// The store
// ============================================================================

pub use admit_store::{CollectionStats, CollectionStore, StoreStats};

// ============================================================================
// Admissions services
// ============================================================================

pub use admit_service::{
    collections, AccountService, ContactFilter, ContactForm, ContactPriority, ContactService,
    ContactStatus, ContactSummary, EnrollmentFilter, EnrollmentForm, EnrollmentService,
    EnrollmentStatus, EnrollmentSummary, LoginRequest, NewUser, ServiceError,
};
