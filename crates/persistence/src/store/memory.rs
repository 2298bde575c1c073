//! In-process document store.
//!
//! Mirrors the PostgreSQL backend's semantics over a `BTreeMap`. Failure
//! injection lets callers simulate an unreachable backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

use super::{CollectionQuery, Document, DocumentStore, Fields, OrderKind, SortDirection};
use crate::error::StoreError;

type DocumentKey = (String, String);

/// Document store kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<DocumentKey, Fields>>,
    failing: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, AtomicOrdering::SeqCst);
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .await
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Unavailable(
                "simulated transport failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Ordering value of a document. Timestamps that do not parse count as missing.
fn order_value<'a>(fields: &'a Fields, query: &CollectionQuery) -> Option<&'a Value> {
    fields
        .get(&query.order_by)
        .filter(|v| !v.is_null())
        .filter(|v| query.order_kind != OrderKind::Timestamp || parse_timestamp(v).is_some())
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn compare_present(a: &Value, b: &Value, kind: OrderKind) -> Ordering {
    if kind == OrderKind::Timestamp {
        if let (Some(a), Some(b)) = (parse_timestamp(a), parse_timestamp(b)) {
            return a.cmp(&b);
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Orders two documents for a scan. Missing values go last in either direction.
fn compare_documents(a: &Document, b: &Document, query: &CollectionQuery) -> Ordering {
    let by_value = match (
        order_value(&a.fields, query),
        order_value(&b.fields, query),
    ) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(x), Some(y)) => compare_present(x, y, query.order_kind),
    };
    let ordering = by_value.then_with(|| a.key.cmp(&b.key));
    match query.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let documents = self.documents.read().await;
        Ok(documents
            .get(&(collection.to_string(), key.to_string()))
            .map(|fields| Document::new(key, fields.clone())))
    }

    async fn update(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        self.check_available()?;
        let mut documents = self.documents.write().await;
        let stored = documents
            .get_mut(&(collection.to_string(), key.to_string()))
            .ok_or_else(|| StoreError::not_found(collection, key))?;
        for (name, value) in fields {
            stored.insert(name, value);
        }
        Ok(())
    }

    async fn set(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        self.check_available()?;
        self.documents
            .write()
            .await
            .insert((collection.to_string(), key.to_string()), fields);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let documents = self.documents.read().await;

        let mut rows: Vec<Document> = documents
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|((_, key), fields)| Document::new(key.clone(), fields.clone()))
            .collect();

        rows.sort_by(|a, b| compare_documents(a, b, query));

        let start = match &query.start_after {
            None => 0,
            Some(after) => match rows.iter().position(|d| &d.key == after) {
                Some(pos) => pos + 1,
                None => return Ok(Vec::new()),
            },
        };

        Ok(rows
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect())
    }
}
