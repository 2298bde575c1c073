//! Help-desk tickets submitted from the mobile app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::StoredDocument;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub status: HelpRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpRequestStatus {
    Open,
    InProgress,
    Resolved,
}

impl fmt::Display for HelpRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelpRequestStatus::Open => write!(f, "open"),
            HelpRequestStatus::InProgress => write!(f, "in_progress"),
            HelpRequestStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl StoredDocument for HelpRequest {
    type Status = HelpRequestStatus;

    const COLLECTION: &'static str = "helpRequests";

    fn id(&self) -> &str {
        &self.id
    }

    fn order_value(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_status(&mut self, status: HelpRequestStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }

    fn fallback() -> Vec<Self> {
        crate::services::fallback::help_requests()
    }
}
