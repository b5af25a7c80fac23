//! Path identifier parsing
//!
//! Path parameters are validated as well-formed UUIDs before they are used
//! as lookup keys; a malformed id is a 400, never a 404.

use crate::core::error::ApiError;
use uuid::Uuid;

/// Parse a raw path segment into a [`Uuid`].
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_valid_uuid() {
        let id = parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_parse_garbage_is_bad_request() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_truncated_uuid_rejected() {
        assert!(parse_id("67e55044-10b1-426f-9247").is_err());
    }
}
