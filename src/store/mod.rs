mod ids;
mod latency;
mod memory;
mod records;
mod repository;
mod schema;
pub mod seed;
mod sqlite;

pub use ids::{next_numeric_id, next_prefixed_id, next_timestamped_id};
pub use latency::{Latency, Op};
pub use memory::MemoryBackend;
pub use repository::Repository;
pub use sqlite::SqliteBackend;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Backend is the persistence substrate: one serialized document per
/// entity kind, read and written whole.
pub trait Backend: Send + Sync {
    fn initialize(&self) -> Result<()>;

    fn read(&self, kind: &str) -> Result<Option<String>>;
    fn write(&self, kind: &str, document: &str) -> Result<()>;
    fn remove(&self, kind: &str) -> Result<bool>;
}

/// An entity kind managed by a [`Repository`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Storage key of the collection in the backend.
    const KIND: &'static str;
    /// Human-readable entity name used in error messages.
    const LABEL: &'static str;
    /// Weight of an update, for the simulated latency.
    const UPDATE_OP: Op = Op::Write;

    /// The record minus its identifier.
    type Draft: Send;

    fn id(&self) -> &str;
    fn next_id(existing: &[Self]) -> String;
    fn from_draft(id: String, draft: Self::Draft) -> Self;
    fn seed() -> Vec<Self>;
}

/// Single equality predicate over a record's serialized field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn store(store_id: impl Into<String>) -> Self {
        Self::eq("storeId", store_id.into())
    }

    #[must_use]
    pub fn matches<T: Serialize>(&self, record: &T) -> bool {
        serde_json::to_value(record)
            .map(|v| v.get(&self.field) == Some(&self.value))
            .unwrap_or(false)
    }
}
