//! Cursor-based pagination utilities.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Serialize;
use thiserror::Error;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Error type for cursor operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("Invalid cursor format")]
    InvalidFormat,
    #[error("Invalid cursor encoding")]
    InvalidEncoding,
    #[error("Cursor belongs to collection '{found}', expected '{expected}'")]
    CollectionMismatch { expected: String, found: String },
}

/// Encodes a cursor pointing after the document `key` of `collection`.
///
/// The cursor format is: base64(collection:key). Binding the collection name
/// stops a cursor from one listing being replayed against another.
pub fn encode_cursor(collection: &str, key: &str) -> String {
    let raw = format!("{}:{}", collection, key);
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a cursor for `expected_collection` and returns the document key.
pub fn decode_cursor(cursor: &str, expected_collection: &str) -> Result<String, CursorError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| CursorError::InvalidEncoding)?;

    let s = String::from_utf8(decoded).map_err(|_| CursorError::InvalidFormat)?;

    // Collection names never contain ':', document keys might.
    let (collection, key) = s.split_once(':').ok_or(CursorError::InvalidFormat)?;

    if collection != expected_collection {
        return Err(CursorError::CollectionMismatch {
            expected: expected_collection.to_string(),
            found: collection.to_string(),
        });
    }
    if key.is_empty() {
        return Err(CursorError::InvalidFormat);
    }

    Ok(key.to_string())
}

/// Clamps a requested page size into `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT)
}

/// One page of an ordered collection scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_cursor() {
        let cursor = encode_cursor("users", "user_42");
        assert_eq!(decode_cursor(&cursor, "users").unwrap(), "user_42");
    }

    #[test]
    fn test_key_with_colon_survives() {
        let cursor = encode_cursor("helpRequests", "ticket:2024:7");
        assert_eq!(
            decode_cursor(&cursor, "helpRequests").unwrap(),
            "ticket:2024:7"
        );
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = decode_cursor("not-valid-base64!!!", "users");
        assert_eq!(result, Err(CursorError::InvalidEncoding));
    }

    #[test]
    fn test_decode_missing_colon() {
        let invalid = URL_SAFE_NO_PAD.encode(b"no-colon-here");
        let result = decode_cursor(&invalid, "users");
        assert_eq!(result, Err(CursorError::InvalidFormat));
    }

    #[test]
    fn test_decode_empty_key() {
        let invalid = URL_SAFE_NO_PAD.encode(b"users:");
        assert_eq!(
            decode_cursor(&invalid, "users"),
            Err(CursorError::InvalidFormat)
        );
    }

    #[test]
    fn test_decode_wrong_collection() {
        let cursor = encode_cursor("payoutRequests", "p1");
        let result = decode_cursor(&cursor, "users");
        assert!(matches!(
            result,
            Err(CursorError::CollectionMismatch { ref found, .. }) if found == "payoutRequests"
        ));
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(10_000)), MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_page_serialization_skips_missing_cursor() {
        let page: Page<u32> = Page {
            items: vec![1, 2],
            next_cursor: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([1, 2]));
        assert!(json.get("nextCursor").is_none());
    }
}
