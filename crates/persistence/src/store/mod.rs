//! Key-addressed document store abstraction.
//!
//! A document is a flat map of top-level fields to JSON values, addressed by
//! collection and key. Stores offer four operations: point read, top-level
//! field update, full overwrite and an ordered collection scan.

mod memory;
mod postgres;

pub use memory::InMemoryDocumentStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Top-level document fields.
pub type Fields = serde_json::Map<String, Value>;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(key: impl Into<String>, fields: Fields) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Deserializes the fields into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.fields))?)
    }

    /// Deserializes the fields into `T`, exposing the key as `id` when the
    /// document does not carry its own.
    pub fn decode_with_id<T: DeserializeOwned>(mut self) -> Result<T, StoreError> {
        self.fields
            .entry("id")
            .or_insert_with(|| Value::String(self.key.clone()));
        self.decode()
    }
}

/// Serializes a value into top-level document fields.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(
            format!("expected an object, got {}", other),
        ))),
    }
}

/// Sort direction of a collection scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// How values of the ordering field compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// RFC 3339 timestamps, compared chronologically.
    Timestamp,
    /// Plain text, compared lexicographically.
    Text,
}

/// Ordered scan over one collection.
///
/// Documents are ordered by `order_by` then by key in the same direction.
/// `start_after` names the key of the last document of the previous page; an
/// unknown key yields an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub order_by: String,
    pub order_kind: OrderKind,
    pub direction: SortDirection,
    pub limit: u32,
    pub start_after: Option<String>,
}

impl CollectionQuery {
    /// Newest-first scan on a timestamp field.
    pub fn newest_first(order_by: impl Into<String>, limit: u32) -> Self {
        Self {
            order_by: order_by.into(),
            order_kind: OrderKind::Timestamp,
            direction: SortDirection::Descending,
            limit,
            start_after: None,
        }
    }

    pub fn start_after(mut self, key: Option<String>) -> Self {
        self.start_after = key;
        self
    }
}

/// Backend holding the dashboard's documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Round-trip check used by readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Point read. A missing document is `Ok(None)`.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    /// Replaces the given top-level fields of an existing document.
    ///
    /// Fields not named are left untouched; nested values are replaced whole.
    /// Fails with `StoreError::NotFound` when the document does not exist.
    async fn update(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError>;

    /// Creates or fully overwrites a document.
    async fn set(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError>;

    /// Ordered, limited scan of a collection.
    async fn query(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>, StoreError>;
}
