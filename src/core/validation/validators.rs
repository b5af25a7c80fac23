//! Reusable field validators
//!
//! Each validator is a closure over a field name and its JSON value,
//! returning a human-readable message on failure. Schemas compose them
//! per field and per operation.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use uuid::Uuid;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"))
}

/// Validator: value must be a string in email format
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_str() {
        Some(s) if email_regex().is_match(s) => Ok(()),
        _ => Err("Invalid email address".to_string()),
    }
}

/// Validator: value must be a string starting with http:// or https://
pub fn url() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_str() {
        Some(s)
            if (s.starts_with("http://") || s.starts_with("https://"))
                && !s.contains(char::is_whitespace)
                && s.len() > 8 =>
        {
            Ok(())
        }
        _ => Err("Invalid URL format".to_string()),
    }
}

/// Validator: string length must be within `[min, max]`
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Err(format!("'{}' must be a string", field));
        };
        let len = s.chars().count();
        if len < min {
            Err(format!("'{}' must be at least {} characters", field, min))
        } else if len > max {
            Err(format!("'{}' cannot exceed {} characters", field, max))
        } else {
            Ok(())
        }
    }
}

/// Validator: string length must not exceed `max`
pub fn max_length(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    string_length(0, max)
}

/// Validator: value must be a boolean
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(format!("'{}' must be a boolean", field))
        }
    }
}

/// Validator: value must be a string parseable as a UUID
pub fn uuid_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if Uuid::parse_str(s).is_ok() => Ok(()),
        _ => Err(format!("'{}' must be a valid UUID", field)),
    }
}

/// Validator: value must be an array of UUID strings (possibly empty)
pub fn uuid_array() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        let Some(items) = value.as_array() else {
            return Err(format!("'{}' must be an array of UUIDs", field));
        };
        for item in items {
            let ok = item.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok());
            if !ok {
                return Err(format!("'{}' must contain only valid UUIDs", field));
            }
        }
        Ok(())
    }
}

/// Validator: value must be a lowercase URL slug, at most `max` characters
pub fn slug(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Err(format!("'{}' must be a string", field));
        };
        if s.chars().count() > max {
            return Err(format!("'{}' cannot exceed {} characters", field, max));
        }
        if slug_regex().is_match(s) {
            Ok(())
        } else {
            Err(format!(
                "'{}' must be a lowercase slug (letters, digits, hyphens)",
                field
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === email() ===

    #[test]
    fn test_email_valid() {
        let v = email();
        assert!(v("email", &json!("alice@example.com")).is_ok());
    }

    #[test]
    fn test_email_missing_at_rejected() {
        let v = email();
        assert!(v("email", &json!("alice.example.com")).is_err());
    }

    #[test]
    fn test_email_non_string_rejected() {
        let v = email();
        assert!(v("email", &json!(42)).is_err());
    }

    // === url() ===

    #[test]
    fn test_url_https_ok() {
        let v = url();
        assert!(v("avatarUrl", &json!("https://cdn.example.com/a.png")).is_ok());
    }

    #[test]
    fn test_url_bad_scheme_rejected() {
        let v = url();
        assert!(v("avatarUrl", &json!("ftp://example.com/a.png")).is_err());
    }

    #[test]
    fn test_url_whitespace_rejected() {
        let v = url();
        assert!(v("avatarUrl", &json!("https://exa mple.com")).is_err());
    }

    // === string_length() ===

    #[test]
    fn test_string_length_too_short() {
        let v = string_length(6, 100);
        let err = v("password", &json!("12345")).unwrap_err();
        assert!(err.contains("at least 6"));
    }

    #[test]
    fn test_string_length_too_long() {
        let v = string_length(1, 5);
        let err = v("name", &json!("abcdef")).unwrap_err();
        assert!(err.contains("exceed 5"));
    }

    #[test]
    fn test_string_length_bounds_inclusive() {
        let v = string_length(3, 5);
        assert!(v("name", &json!("abc")).is_ok());
        assert!(v("name", &json!("abcde")).is_ok());
    }

    #[test]
    fn test_string_length_non_string_rejected() {
        let v = string_length(1, 5);
        assert!(v("name", &json!(true)).is_err());
    }

    // === boolean() ===

    #[test]
    fn test_boolean_accepts_bool() {
        let v = boolean();
        assert!(v("published", &json!(true)).is_ok());
        assert!(v("published", &json!(false)).is_ok());
    }

    #[test]
    fn test_boolean_rejects_string() {
        let v = boolean();
        assert!(v("published", &json!("true")).is_err());
    }

    // === uuid_string() ===

    #[test]
    fn test_uuid_string_valid() {
        let v = uuid_string();
        assert!(v("userId", &json!("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_ok());
    }

    #[test]
    fn test_uuid_string_invalid() {
        let v = uuid_string();
        assert!(v("userId", &json!("67e55044")).is_err());
    }

    // === uuid_array() ===

    #[test]
    fn test_uuid_array_empty_ok() {
        let v = uuid_array();
        assert!(v("categoryIds", &json!([])).is_ok());
    }

    #[test]
    fn test_uuid_array_mixed_rejected() {
        let v = uuid_array();
        assert!(
            v(
                "categoryIds",
                &json!(["67e55044-10b1-426f-9247-bb680e5fe0c8", "nope"])
            )
            .is_err()
        );
    }

    #[test]
    fn test_uuid_array_non_array_rejected() {
        let v = uuid_array();
        assert!(v("categoryIds", &json!("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_err());
    }

    // === slug() ===

    #[test]
    fn test_slug_valid() {
        let v = slug(120);
        assert!(v("slug", &json!("my-first-post")).is_ok());
    }

    #[test]
    fn test_slug_uppercase_rejected() {
        let v = slug(120);
        assert!(v("slug", &json!("My-Post")).is_err());
    }

    #[test]
    fn test_slug_trailing_hyphen_rejected() {
        let v = slug(120);
        assert!(v("slug", &json!("my-post-")).is_err());
    }

    #[test]
    fn test_slug_too_long_rejected() {
        let v = slug(5);
        assert!(v("slug", &json!("abcdef")).is_err());
    }
}
