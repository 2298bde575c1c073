//! Contract between domain records and the document collections they live in.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record stored as one document in a named collection.
///
/// Listing order is `ORDER_FIELD` descending with the document key as tiebreak.
pub trait StoredDocument: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Lifecycle status enumeration of the record.
    type Status: Serialize + DeserializeOwned + Copy + PartialEq + Send + Sync + std::fmt::Display;

    /// Collection name.
    const COLLECTION: &'static str;

    /// Stored field used to order collection scans.
    const ORDER_FIELD: &'static str = "createdAt";

    /// Stable document key.
    fn id(&self) -> &str;

    /// Value of `ORDER_FIELD` for in-memory ordering of fallback data.
    fn order_value(&self) -> DateTime<Utc>;

    /// Sets status and refreshes the update timestamp.
    fn set_status(&mut self, status: Self::Status, at: DateTime<Utc>);

    /// Static records served when no document store is configured.
    fn fallback() -> Vec<Self>;
}

/// Request body for a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest<S> {
    pub status: S,
}
