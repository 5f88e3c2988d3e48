//! Input validation for catalog drafts and query parameters
//!
//! # Example
//!
//! ```rust
//! use mallorca_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Es")
//!     .min_length("name", "Es", 3)
//!     .url("google_maps_url", "not a url")
//!     .validate();
//!
//! assert_eq!(result.errors().len(), 2);
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTTP_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d+)?(/\S*)?$").expect("static URL pattern compiles")
});

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    ///
    /// # Errors
    /// Returns a [`ErrorCode::ValidationError`] listing every failed field.
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn fail(
        mut self,
        field: &str,
        message: String,
        code: &str,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
        self
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.fail(
                field,
                "Field is required".to_string(),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate minimum length in characters
    #[must_use]
    pub fn min_length(self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len < min {
            return self.fail(
                field,
                format!("Must be at least {} characters", min),
                "MIN_LENGTH",
                Some(format!(">= {} chars", min)),
                Some(format!("{} chars", len)),
            );
        }
        self
    }

    /// Validate maximum length in characters
    #[must_use]
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            return self.fail(
                field,
                format!("Must be at most {} characters", max),
                "MAX_LENGTH",
                Some(format!("<= {} chars", max)),
                Some(format!("{} chars", len)),
            );
        }
        self
    }

    /// Validate against a regex pattern
    #[must_use]
    pub fn pattern(self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(value) => self,
            Ok(_) => self.fail(
                field,
                format!("Must match {}", description),
                "PATTERN",
                Some(description.to_string()),
                Some(value.to_string()),
            ),
            Err(_) => self.fail(
                field,
                "Invalid validation pattern".to_string(),
                "INTERNAL",
                None,
                None,
            ),
        }
    }

    /// Validate an absolute http(s) URL
    #[must_use]
    pub fn url(self, field: &str, value: &str) -> Self {
        if HTTP_URL.is_match(value) {
            return self;
        }
        self.fail(
            field,
            "Must be an http(s) URL".to_string(),
            "URL",
            Some("http(s)://host/path".to_string()),
            Some(value.to_string()),
        )
    }

    /// Validate an optional URL; `None` passes
    #[must_use]
    pub fn optional_url(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(url) => self.url(field, url),
            None => self,
        }
    }

    /// Validate that a value is in a list of allowed values
    #[must_use]
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if allowed.contains(&value) {
            return self;
        }
        self.fail(
            field,
            format!("Must be one of: {}", allowed.join(", ")),
            "ONE_OF",
            Some(allowed.join(", ")),
            Some(value.to_string()),
        )
    }

    /// Validate a numeric range (inclusive)
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            return self.fail(
                field,
                format!("Must be between {} and {}", min, max),
                "RANGE",
                Some(format!("{} - {}", min, max)),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Add a custom validation; the closure returns a message on failure
    #[must_use]
    pub fn custom<F>(self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        match f() {
            Some(message) => self.fail(field, message, "CUSTOM", None, None),
            None => self,
        }
    }

    /// Add a warning (non-blocking)
    #[must_use]
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("name", "  ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_min_length_counts_chars() {
        // "Deià" is 4 chars but 5 bytes
        let result = Validator::new().max_length("name", "Deià", 4).validate();
        assert!(result.is_valid());

        let result = Validator::new().min_length("name", "Sa", 3).validate();
        assert_eq!(result.errors()[0].code, "MIN_LENGTH");
    }

    #[test]
    fn test_max_length_validation() {
        let result = Validator::new()
            .max_length("name", "Sant Llorenç des Cardassar", 10)
            .validate();
        assert_eq!(result.errors()[0].code, "MAX_LENGTH");
    }

    #[test]
    fn test_url_validation() {
        let ok = Validator::new()
            .url("google_maps_url", "https://maps.google.com/?q=Bellver")
            .validate();
        assert!(ok.is_valid());

        let bad = Validator::new().url("google_maps_url", "maps.google.com").validate();
        assert_eq!(bad.errors()[0].code, "URL");

        let none = Validator::new().optional_url("url", None).validate();
        assert!(none.is_valid());
    }

    #[test]
    fn test_pattern_validation() {
        let result = Validator::new()
            .pattern("phone", "call me", r"^\+?[0-9 ]{6,20}$", "phone number")
            .validate();
        assert_eq!(result.errors()[0].code, "PATTERN");
    }

    #[test]
    fn test_one_of_validation() {
        let result = Validator::new()
            .one_of("level", "loud", &["info", "warn"])
            .validate();
        assert_eq!(result.errors()[0].code, "ONE_OF");
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("limit", 1500, 1, 1000).validate();
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let result = Validator::new()
            .warn_if("image", true, "No image provided")
            .validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_to_result_lists_fields() {
        let err = Validator::new()
            .required("name", "")
            .min_length("description", "short", 10)
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("name"));
        assert!(err.message.contains("description"));
    }
}
