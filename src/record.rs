use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key under which the lookup time is stored.
pub const LOOKED_UP_AT: &str = "looked_up_at";

/// One past location lookup.
///
/// Only `name` is interpreted here. Everything else the data source supplied
/// (coordinates, country, lookup time, ...) is kept verbatim in `metadata` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Canonical name as returned by the data source. Case-sensitive.
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl LocationRecord {
    /// Creates a record with no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }

    /// Creates a record stamped with the time of the lookup.
    pub fn looked_up(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        let mut record = Self::new(name);
        record
            .metadata
            .insert(LOOKED_UP_AT.to_string(), Value::String(at.to_rfc3339()));
        record
    }

    /// Returns the lookup time if the record carries a parseable one.
    pub fn looked_up_at(&self) -> Option<DateTime<Utc>> {
        self.metadata
            .get(LOOKED_UP_AT)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
