//! Declarative request-body schemas
//!
//! A [`Schema`] lists the fields an operation accepts, whether each is
//! required, and the validator applied to its value. `validate` collects
//! every field failure in one pass and strips unknown fields from the
//! accepted payload, so handlers only ever see declared fields.

use crate::core::error::FieldError;
use serde_json::{Map, Value};

type Check = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

struct FieldRule {
    name: &'static str,
    required: bool,
    check: Check,
}

/// A per-operation validation schema.
#[derive(Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a required field with a content validator.
    pub fn required<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields.push(FieldRule {
            name,
            required: true,
            check: Box::new(check),
        });
        self
    }

    /// Declare an optional field with a content validator.
    pub fn optional<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields.push(FieldRule {
            name,
            required: false,
            check: Box::new(check),
        });
        self
    }

    /// Validate a payload against this schema.
    ///
    /// Returns the payload reduced to the declared fields on success, or
    /// every field-level failure at once. Absent and `null` both count as
    /// "not provided"; a missing required field is an error, a missing
    /// optional field is skipped.
    pub fn validate(&self, payload: &Value) -> Result<Value, Vec<FieldError>> {
        let Some(obj) = payload.as_object() else {
            return Err(vec![FieldError::new("body", "Expected a JSON object")]);
        };

        let mut errors = Vec::new();
        let mut accepted = Map::new();

        for rule in &self.fields {
            match obj.get(rule.name) {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.push(FieldError::new(
                            rule.name,
                            format!("'{}' is required", rule.name),
                        ));
                    }
                }
                Some(value) => {
                    if let Err(message) = (rule.check)(rule.name, value) {
                        errors.push(FieldError::new(rule.name, message));
                        continue;
                    }
                    accepted.insert(rule.name.to_string(), value.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(accepted))
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::{email, string_length};
    use serde_json::json;

    fn user_schema() -> Schema {
        Schema::new()
            .required("email", email())
            .required("password", string_length(6, 100))
            .optional("firstName", string_length(1, 100))
    }

    #[test]
    fn test_valid_payload_passes() {
        let out = user_schema()
            .validate(&json!({"email": "a@b.io", "password": "secret1"}))
            .unwrap();
        assert_eq!(out["email"], "a@b.io");
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let errors = user_schema().validate(&json!({})).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let errors = user_schema()
            .validate(&json!({"email": null, "password": "secret1"}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_unknown_fields_stripped() {
        let out = user_schema()
            .validate(&json!({
                "email": "a@b.io",
                "password": "secret1",
                "role": "admin"
            }))
            .unwrap();
        assert!(out.get("role").is_none());
    }

    #[test]
    fn test_optional_field_validated_when_present() {
        let errors = user_schema()
            .validate(&json!({
                "email": "a@b.io",
                "password": "secret1",
                "firstName": ""
            }))
            .unwrap_err();
        assert_eq!(errors[0].field, "firstName");
    }

    #[test]
    fn test_optional_field_absent_is_fine() {
        assert!(
            user_schema()
                .validate(&json!({"email": "a@b.io", "password": "secret1"}))
                .is_ok()
        );
    }

    #[test]
    fn test_non_object_body_rejected() {
        let errors = user_schema().validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn test_content_and_missing_errors_combined() {
        let errors = user_schema()
            .validate(&json!({"email": "not-an-email"}))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
