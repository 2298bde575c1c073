//! Settings repository: read, partial write and full write of the AppSettings document.
//!
//! Every operation branches only on the `ConnectionState`:
//! - `Unconfigured`: reads return the fixed fallback settings, writes succeed as no-ops.
//! - `Configured`: operations hit the store; failures are logged and degrade
//!   to `None` / `false` instead of surfacing to the caller.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use domain::models::{AppSettings, SettingsPatch, SETTINGS_COLLECTION};
use domain::services::fallback;

use crate::connection::ConnectionState;
use crate::error::StoreError;
use crate::metrics::{record_fallback, FallbackReason};
use crate::store::to_fields;

/// Stored field stamped on every write.
const UPDATED_AT_FIELD: &str = "updatedAt";

/// Repository for the single AppSettings document.
#[derive(Clone, Debug)]
pub struct SettingsRepository {
    connection: ConnectionState,
    document_key: String,
}

impl SettingsRepository {
    /// Creates a repository over `connection` addressing `settings/<document_key>`.
    pub fn new(connection: ConnectionState, document_key: impl Into<String>) -> Self {
        Self {
            connection,
            document_key: document_key.into(),
        }
    }

    pub fn document_key(&self) -> &str {
        &self.document_key
    }

    pub fn is_configured(&self) -> bool {
        self.connection.is_configured()
    }

    /// Returns the current settings.
    ///
    /// `None` means the document is absent or could not be read; the two
    /// cases are not distinguished for the caller.
    pub async fn fetch_settings(&self) -> Option<AppSettings> {
        let Some(store) = self.connection.store() else {
            debug!("Document store not configured; returning fallback settings");
            record_fallback(SETTINGS_COLLECTION, FallbackReason::Unconfigured);
            return Some(fallback::app_settings());
        };

        match store.get(SETTINGS_COLLECTION, &self.document_key).await {
            Ok(Some(document)) => {
                let (settings, rejected) = AppSettings::from_stored_fields(document.fields);
                if !rejected.is_empty() {
                    warn!(
                        key = %self.document_key,
                        groups = ?rejected,
                        "Stored settings groups did not decode; serving defaults for them"
                    );
                }
                Some(settings)
            }
            Ok(None) => {
                info!(key = %self.document_key, "Settings document does not exist");
                None
            }
            Err(e) => {
                error!(key = %self.document_key, error = %e, "Failed to fetch settings");
                record_fallback(SETTINGS_COLLECTION, FallbackReason::Transport);
                None
            }
        }
    }

    /// Replaces the groups present in `patch` and stamps `updatedAt`.
    ///
    /// Returns `false` on any store failure, including a missing document.
    /// Nothing is retried.
    pub async fn apply_partial_update(&self, patch: SettingsPatch) -> bool {
        let groups = patch.group_names();

        let Some(store) = self.connection.store() else {
            debug!(groups = ?groups, "Document store not configured; simulating settings update");
            return true;
        };

        let mut fields = match patch.into_fields() {
            Ok(fields) => fields,
            Err(e) => {
                error!(error = %e, "Failed to serialize settings patch");
                return false;
            }
        };
        let now = match serde_json::to_value(Utc::now()) {
            Ok(now) => now,
            Err(e) => {
                error!(error = %e, "Failed to serialize update timestamp");
                return false;
            }
        };
        fields.insert(UPDATED_AT_FIELD.to_string(), now);

        match store
            .update(SETTINGS_COLLECTION, &self.document_key, fields)
            .await
        {
            Ok(()) => {
                info!(key = %self.document_key, groups = ?groups, "Settings updated");
                true
            }
            Err(e) => {
                error!(key = %self.document_key, groups = ?groups, error = %e, "Failed to update settings");
                false
            }
        }
    }

    /// Overwrites the whole settings document, stamping `updatedAt`.
    ///
    /// No existence check and no merge. Returns the document as written.
    pub async fn create_settings(&self, document: AppSettings) -> Result<AppSettings, StoreError> {
        let document = document.stamped(Utc::now());

        let Some(store) = self.connection.store() else {
            warn!("Document store not configured; settings overwrite skipped");
            return Ok(document);
        };

        let fields = to_fields(&document)?;
        store
            .set(SETTINGS_COLLECTION, &self.document_key, fields)
            .await?;
        info!(key = %self.document_key, "Settings document written");
        Ok(document)
    }
}
