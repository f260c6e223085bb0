//! Shape unwrapper — turns the raw project store into an ordered record list
//!
//! The bundled data file has been seen in three shapes:
//!
//! ```text
//! [ {..}, {..} ]              → Sequence
//! { "projects": [ {..} ] }    → Wrapped
//! { "id": .., "name": .. }    → Single
//! ```
//!
//! Unwrapping never fails. Anything that is neither a sequence nor a
//! wrapper becomes a one-element sequence, `null` included.

use serde_json::Value;
use tracing::debug;

/// Which of the tolerated shapes the store was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreShape {
    /// Already an ordered sequence of records
    Sequence,
    /// Object whose `projects` field holds the sequence
    Wrapped,
    /// Any other value, treated as a single record
    Single,
}

impl std::fmt::Display for StoreShape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StoreShape::Sequence => write!(f, "sequence"),
            StoreShape::Wrapped => write!(f, "wrapped"),
            StoreShape::Single => write!(f, "single"),
        }
    }
}

/// Detect the shape of a raw store
pub fn detect_shape(store: &Value) -> StoreShape {
    match store {
        Value::Array(_) => StoreShape::Sequence,
        Value::Object(map) if matches!(map.get("projects"), Some(Value::Array(_))) => {
            StoreShape::Wrapped
        }
        _ => StoreShape::Single,
    }
}

/// Unwrap a raw store into its ordered records, borrowing from the store
pub fn unwrap_store(store: &Value) -> Vec<&Value> {
    let shape = detect_shape(store);
    let records: Vec<&Value> = match (shape, store) {
        (StoreShape::Sequence, Value::Array(items)) => items.iter().collect(),
        (StoreShape::Wrapped, Value::Object(map)) => match map.get("projects") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![store],
        },
        _ => vec![store],
    };
    debug!(%shape, records = records.len(), "unwrapped project store");
    records
}

/// Unwrap a store that may be missing altogether
///
/// An absent store has no records; a present `null` is still a single
/// (empty) record.
pub fn unwrap_optional(store: Option<&Value>) -> Vec<&Value> {
    match store {
        Some(store) => unwrap_store(store),
        None => {
            debug!("project store absent, no records");
            Vec::new()
        }
    }
}
