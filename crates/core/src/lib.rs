//! Core types for the admitdb in-memory datastore.
//!
//! This crate defines the pieces shared by every other crate in the
//! workspace:
//! - [`Record`] / [`RecordId`] / [`Fields`]: the stored data model
//! - [`StoreError`] / [`Result`]: the two failure kinds the store produces
//! - [`StoreConfig`]: lock acquisition tuning

pub mod config;
pub mod error;
pub mod record;

pub use config::{StoreConfig, DEFAULT_LOCK_TIMEOUT};
pub use error::{Result, StoreError};
pub use record::{Fields, Record, RecordId};
