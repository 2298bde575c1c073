//! Payout requests raised by hosts/agencies and the methods they can be paid through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::document::StoredDocument;

/// A request to convert coins into a payout.
///
/// `user_id` and `payout_method_id` are plain strings; nothing checks that
/// the referenced documents exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub id: String,
    pub user_id: String,
    pub payout_method_id: String,
    pub coins: i64,
    /// Decimal amount in `currency`, as a string.
    pub amount: String,
    pub currency: String,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Approved => "approved",
            PayoutStatus::Rejected => "rejected",
            PayoutStatus::Paid => "paid",
        }
    }
}

impl FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PayoutStatus::Pending),
            "approved" => Ok(PayoutStatus::Approved),
            "rejected" => Ok(PayoutStatus::Rejected),
            "paid" => Ok(PayoutStatus::Paid),
            _ => Err(format!("Invalid payout status: {}", s)),
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StoredDocument for PayoutRequest {
    type Status = PayoutStatus;

    const COLLECTION: &'static str = "payoutRequests";

    fn id(&self) -> &str {
        &self.id
    }

    fn order_value(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_status(&mut self, status: PayoutStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }

    fn fallback() -> Vec<Self> {
        crate::services::fallback::payout_requests()
    }
}

/// A payout channel (bank transfer, UPI, PayPal, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutMethod {
    pub id: String,
    pub name: String,
    /// Details the requester must supply, e.g. "accountNumber".
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub status: PayoutMethodStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMethodStatus {
    Active,
    Inactive,
}

impl fmt::Display for PayoutMethodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoutMethodStatus::Active => write!(f, "active"),
            PayoutMethodStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl StoredDocument for PayoutMethod {
    type Status = PayoutMethodStatus;

    const COLLECTION: &'static str = "payoutMethods";

    fn id(&self) -> &str {
        &self.id
    }

    fn order_value(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_status(&mut self, status: PayoutMethodStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }

    fn fallback() -> Vec<Self> {
        crate::services::fallback::payout_methods()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_status_from_str() {
        assert_eq!(PayoutStatus::from_str("paid").unwrap(), PayoutStatus::Paid);
        assert_eq!(
            PayoutStatus::from_str("Pending").unwrap(),
            PayoutStatus::Pending
        );
        assert!(PayoutStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_payout_status_serde() {
        let json = serde_json::to_string(&PayoutStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let status: PayoutStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, PayoutStatus::Rejected);
    }

    #[test]
    fn test_payout_method_status_display() {
        assert_eq!(PayoutMethodStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn test_payout_request_dangling_user_id_is_accepted() {
        let raw = serde_json::json!({
            "id": "p1",
            "userId": "does-not-exist",
            "payoutMethodId": "m1",
            "coins": 5000,
            "amount": "2.50",
            "currency": "USD",
            "status": "pending",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });
        let request: PayoutRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.user_id, "does-not-exist");
    }
}
