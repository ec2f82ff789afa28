//! Records: the unit of storage.
//!
//! A [`Record`] is a caller-supplied JSON field map plus three
//! system-managed fields:
//! - `id`: opaque unique identifier, generated at creation, immutable
//! - `createdAt`: set once at creation
//! - `updatedAt`: refreshed on every mutation
//!
//! System fields live outside the field map; the reserved key names are
//! stripped from caller data so a field map can never overwrite them.
//! Records serialize flat (system fields and caller fields side by side,
//! camelCase), matching the shape collaborators exchange over the wire.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Caller-supplied field data: a JSON object.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Field names managed by the store and stripped from caller data.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Opaque unique identifier for a record.
///
/// Generated at creation (UUID v4) and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordId(Uuid::parse_str(s)?))
    }
}

/// A stored record: system fields plus caller field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier, immutable after creation
    pub id: RecordId,
    /// Creation time, immutable after creation
    pub created_at: DateTime<Utc>,
    /// Last mutation time; strictly advances on every update
    pub updated_at: DateTime<Utc>,
    /// Caller field data (reserved keys already stripped)
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Build a new record from caller fields.
    ///
    /// Assigns a fresh id and equal created/updated timestamps. Reserved
    /// keys in `fields` are dropped.
    pub fn new(mut fields: Fields) -> Self {
        strip_reserved(&mut fields);
        let now = Utc::now();
        Record {
            id: RecordId::new(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Look up a caller field by name.
    ///
    /// System fields are not addressable here; they have their own typed
    /// accessors.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Convenience accessor for string-valued fields.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|v| v.as_str())
    }

    /// True if every key in `criteria` strictly equals the corresponding
    /// caller field value.
    ///
    /// Strict `serde_json::Value` equality: no coercion, no substring
    /// matching. A criteria key the record does not have never matches.
    pub fn matches(&self, criteria: &Fields) -> bool {
        criteria
            .iter()
            .all(|(key, expected)| self.fields.get(key) == Some(expected))
    }

    /// Merge `partial` over the existing fields and advance `updated_at`.
    ///
    /// `id` and `created_at` are untouched by construction; reserved keys
    /// in `partial` are dropped so they cannot shadow the system fields on
    /// serialization. Fields not named in `partial` keep their values.
    pub fn apply(&mut self, mut partial: Fields) {
        strip_reserved(&mut partial);
        for (key, value) in partial {
            self.fields.insert(key, value);
        }
        self.updated_at = advance(self.updated_at);
    }
}

/// Remove store-managed keys from a caller field map.
fn strip_reserved(fields: &mut Fields) {
    for key in RESERVED_FIELDS {
        fields.remove(key);
    }
}

/// Next value for `updated_at`.
///
/// `updated_at` must move strictly forward even when two mutations land
/// within the clock's resolution.
fn advance(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + ChronoDuration::nanoseconds(1)
    }
}
