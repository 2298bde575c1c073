//! Generic repository for the dashboard's secondary collections.
//!
//! Same fallback policy as the settings repository: fallback data when
//! unconfigured, logged degradation to empty / `None` / `false` on failure.

use chrono::Utc;
use serde::Deserialize;
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};

use domain::models::StoredDocument;
use shared::pagination::{clamp_limit, decode_cursor, encode_cursor, CursorError, Page};

use crate::connection::ConnectionState;
use crate::metrics::{record_fallback, FallbackReason};
use crate::store::{CollectionQuery, Fields};

/// Page request for a collection listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

/// Repository over the collection of `T`.
pub struct CollectionRepository<T> {
    connection: ConnectionState,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: StoredDocument> CollectionRepository<T> {
    pub fn new(connection: ConnectionState) -> Self {
        Self {
            connection,
            _marker: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    /// Lists one page, newest first.
    ///
    /// Only a malformed cursor is an error; store failures yield an empty page.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>, CursorError> {
        let limit = clamp_limit(query.limit);
        let after = query
            .cursor
            .as_deref()
            .map(|c| decode_cursor(c, T::COLLECTION))
            .transpose()?;

        let Some(store) = self.connection.store() else {
            record_fallback(T::COLLECTION, FallbackReason::Unconfigured);
            return Ok(paginate_fallback(limit, after.as_deref()));
        };

        // One extra row tells whether another page exists.
        let scan = CollectionQuery::newest_first(T::ORDER_FIELD, limit + 1).start_after(after);
        let documents = match store.query(T::COLLECTION, &scan).await {
            Ok(documents) => documents,
            Err(e) => {
                error!(collection = T::COLLECTION, error = %e, "Failed to list collection");
                record_fallback(T::COLLECTION, FallbackReason::Transport);
                return Ok(Page::empty());
            }
        };

        let has_more = documents.len() > limit as usize;
        let mut last_key = None;
        let mut items = Vec::with_capacity(documents.len().min(limit as usize));
        for document in documents.into_iter().take(limit as usize) {
            let key = document.key.clone();
            match document.decode_with_id::<T>() {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(collection = T::COLLECTION, key = %key, error = %e, "Skipping undecodable document");
                }
            }
            last_key = Some(key);
        }

        let next_cursor = match (has_more, last_key) {
            (true, Some(key)) => Some(encode_cursor(T::COLLECTION, &key)),
            _ => None,
        };
        Ok(Page { items, next_cursor })
    }

    /// Point read by document key.
    pub async fn get(&self, id: &str) -> Option<T> {
        let Some(store) = self.connection.store() else {
            record_fallback(T::COLLECTION, FallbackReason::Unconfigured);
            return T::fallback().into_iter().find(|item| item.id() == id);
        };

        match store.get(T::COLLECTION, id).await {
            Ok(Some(document)) => match document.decode_with_id::<T>() {
                Ok(item) => Some(item),
                Err(e) => {
                    error!(collection = T::COLLECTION, key = %id, error = %e, "Failed to decode document");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(collection = T::COLLECTION, key = %id, error = %e, "Failed to fetch document");
                record_fallback(T::COLLECTION, FallbackReason::Transport);
                None
            }
        }
    }

    /// Sets `status` and stamps `updatedAt`. `false` on any failure.
    pub async fn update_status(&self, id: &str, status: T::Status) -> bool {
        let Some(store) = self.connection.store() else {
            debug!(collection = T::COLLECTION, key = %id, status = %status, "Document store not configured; simulating status update");
            return true;
        };

        let mut fields = Fields::new();
        match (serde_json::to_value(status), serde_json::to_value(Utc::now())) {
            (Ok(status), Ok(now)) => {
                fields.insert("status".to_string(), status);
                fields.insert("updatedAt".to_string(), now);
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(collection = T::COLLECTION, error = %e, "Failed to serialize status update");
                return false;
            }
        }

        match store.update(T::COLLECTION, id, fields).await {
            Ok(()) => {
                info!(collection = T::COLLECTION, key = %id, status = %status, "Status updated");
                true
            }
            Err(e) => {
                error!(collection = T::COLLECTION, key = %id, error = %e, "Failed to update status");
                false
            }
        }
    }
}

/// Pages through the static fallback list in the same order a store scan uses.
fn paginate_fallback<T: StoredDocument>(limit: u32, after: Option<&str>) -> Page<T> {
    let mut items = T::fallback();
    items.sort_by(|a, b| {
        b.order_value()
            .cmp(&a.order_value())
            .then_with(|| b.id().cmp(a.id()))
    });

    let start = match after {
        None => 0,
        Some(key) => match items.iter().position(|item| item.id() == key) {
            Some(pos) => pos + 1,
            None => return Page::empty(),
        },
    };

    let mut page: Vec<T> = items.into_iter().skip(start).take(limit as usize + 1).collect();
    let next_cursor = if page.len() > limit as usize {
        page.truncate(limit as usize);
        page.last().map(|item| encode_cursor(T::COLLECTION, item.id()))
    } else {
        None
    };

    Page {
        items: page,
        next_cursor,
    }
}
