use std::collections::HashMap;

use crate::error::ApiError;

/// Collects required string fields from a request body.
///
/// Absent and empty values both count as missing. Every missing field is
/// reported together in `field_errors`.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: HashMap<String, String>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value, or record the field as missing and return an empty string.
    pub fn take(&mut self, name: &str, value: Option<String>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                self.missing
                    .insert(name.to_string(), "This field is required".to_string());
                String::new()
            }
        }
    }

    pub fn finish(self, message: &str) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(message, Some(self.missing)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_missing_field() {
        let mut fields = RequiredFields::new();
        let title = fields.take("title", Some("hello".into()));
        fields.take("description", Some(String::new()));
        fields.take("extra", None);

        assert_eq!(title, "hello");
        match fields.finish("Title and description are required") {
            Err(ApiError::ValidationError {
                message,
                field_errors: Some(errors),
            }) => {
                assert_eq!(message, "Title and description are required");
                assert_eq!(errors.len(), 2);
                assert!(errors.contains_key("description"));
                assert!(errors.contains_key("extra"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn passes_when_all_present() {
        let mut fields = RequiredFields::new();
        fields.take("email", Some("a@example.com".into()));
        assert!(fields.finish("All fields are required").is_ok());
    }
}
