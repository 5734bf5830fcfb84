//! Config validation against the declared schema.
//!
//! This is the boundary layer that rejects configuration before it reaches the
//! resolver. The resolver itself never validates.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{SCOPES_KEY, TOKEN_URI_KEY};
use crate::schema::ConfigSchema;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation error codes.
///
/// These represent errors that always cause validation to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// E001: A required field is missing.
    #[serde(rename = "E001")]
    MissingRequiredField,

    /// E002: A required field is present but empty.
    #[serde(rename = "E002")]
    EmptyRequiredField,

    /// E003: Token URI does not use HTTPS.
    #[serde(rename = "E003")]
    InsecureTokenUri,

    /// E004: Scope list contains an empty entry.
    #[serde(rename = "E004")]
    EmptyScope,
}

/// Validation warning codes.
///
/// These only fail validation in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// W001: Field is not declared in the schema.
    #[serde(rename = "W001")]
    UnknownField,
}

/// Either an error or a warning code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationCode {
    Error(ErrorCode),
    Warning(WarningCode),
}

/// Validation result with categorized issues.
#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    /// Validation errors (always fail).
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (fail with --strict).
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Error/warning code.
    pub code: ValidationCode,

    /// Short description.
    pub message: String,

    /// Config key the issue refers to.
    pub location: String,

    /// Optional help suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ValidationCode {
    /// Diagnostic label: `error` or `warning`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error(_) => "error",
            Self::Warning(_) => "warning",
        }
    }
}

impl ValidationResult {
    /// Returns true if there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are no errors or warnings.
    pub fn is_strict_valid(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn error(&mut self, code: ErrorCode, location: &str, message: String, help: Option<String>) {
        self.errors.push(ValidationIssue {
            code: ValidationCode::Error(code),
            message,
            location: location.to_string(),
            help,
        });
    }

    fn warning(&mut self, code: WarningCode, location: &str, message: String) {
        self.warnings.push(ValidationIssue {
            code: ValidationCode::Warning(code),
            message,
            location: location.to_string(),
            help: None,
        });
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate config values against the default schema.
pub fn validate_config(values: &BTreeMap<String, String>) -> ValidationResult {
    validate_against(&ConfigSchema::default(), values)
}

/// Validate config values against a schema.
pub fn validate_against(
    schema: &ConfigSchema,
    values: &BTreeMap<String, String>,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (name, field) in schema.fields() {
        if !field.required {
            continue;
        }
        match values.get(name) {
            None => result.error(
                ErrorCode::MissingRequiredField,
                name,
                "missing required field".to_string(),
                Some(format!("pass it with -k {}=...", name)),
            ),
            Some(v) if v.is_empty() => result.error(
                ErrorCode::EmptyRequiredField,
                name,
                "required field is empty".to_string(),
                None,
            ),
            Some(_) => {}
        }
    }

    // Empty optional values count as unset.
    if let Some(uri) = values.get(TOKEN_URI_KEY)
        && !uri.is_empty()
        && !uri.starts_with("https://")
    {
        result.error(
            ErrorCode::InsecureTokenUri,
            TOKEN_URI_KEY,
            format!("token URI must use HTTPS, got '{}'", uri),
            Some("use https://oauth2.googleapis.com/token".to_string()),
        );
    }

    if let Some(scopes) = values.get(SCOPES_KEY)
        && !scopes.is_empty()
        && scopes.split(',').any(|s| s.trim().is_empty())
    {
        result.error(
            ErrorCode::EmptyScope,
            SCOPES_KEY,
            "scope list contains an empty scope".to_string(),
            None,
        );
    }

    for name in values.keys() {
        if !schema.contains(name) {
            tracing::warn!(field = %name, "ignoring unknown config field");
            result.warning(
                WarningCode::UnknownField,
                name,
                "field is not declared in the schema".to_string(),
            );
        }
    }

    result
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::MissingRequiredField => "E001",
            Self::EmptyRequiredField => "E002",
            Self::InsecureTokenUri => "E003",
            Self::EmptyScope => "E004",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "W001"),
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(code) => write!(f, "{}", code),
            Self::Warning(code) => write!(f, "{}", code),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLIENT_ID_KEY, CLIENT_SECRET_KEY, REFRESH_TOKEN_KEY};

    fn valid_values() -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        values.insert(CLIENT_ID_KEY.to_string(), "abc".to_string());
        values.insert(CLIENT_SECRET_KEY.to_string(), "xyz".to_string());
        values.insert(REFRESH_TOKEN_KEY.to_string(), "tok123".to_string());
        values
    }

    fn error_codes(result: &ValidationResult) -> Vec<ValidationCode> {
        result.errors.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_valid_config() {
        let result = validate_config(&valid_values());
        assert!(result.is_valid());
        assert!(result.is_strict_valid());
    }

    #[test]
    fn test_missing_refresh_token_is_rejected() {
        let mut values = valid_values();
        values.remove(REFRESH_TOKEN_KEY);

        let result = validate_config(&values);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].code,
            ValidationCode::Error(ErrorCode::MissingRequiredField)
        );
        assert_eq!(result.errors[0].location, REFRESH_TOKEN_KEY);
    }

    #[test]
    fn test_empty_config_reports_every_required_field() {
        let result = validate_config(&BTreeMap::new());
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_blank_required_field() {
        let mut values = valid_values();
        values.insert(CLIENT_ID_KEY.to_string(), String::new());

        let result = validate_config(&values);
        assert_eq!(
            error_codes(&result),
            vec![ValidationCode::Error(ErrorCode::EmptyRequiredField)]
        );

        // Whitespace is a value, not an absence.
        values.insert(CLIENT_ID_KEY.to_string(), " ".to_string());
        assert!(validate_config(&values).is_valid());
    }

    #[test]
    fn test_empty_optional_values_are_unset() {
        let mut values = valid_values();
        values.insert(TOKEN_URI_KEY.to_string(), String::new());
        values.insert(SCOPES_KEY.to_string(), String::new());

        let result = validate_config(&values);
        assert!(result.is_strict_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_token_uri_must_be_https() {
        let mut values = valid_values();
        values.insert(TOKEN_URI_KEY.to_string(), "http://invalid.uri".to_string());
        let result = validate_config(&values);
        assert_eq!(
            error_codes(&result),
            vec![ValidationCode::Error(ErrorCode::InsecureTokenUri)]
        );

        values.insert(
            TOKEN_URI_KEY.to_string(),
            "https://oauth2.googleapis.com/token".to_string(),
        );
        assert!(validate_config(&values).is_valid());
    }

    #[test]
    fn test_empty_scopes() {
        let mut values = valid_values();
        values.insert(SCOPES_KEY.to_string(), ",,".to_string());
        let result = validate_config(&values);
        assert_eq!(
            error_codes(&result),
            vec![ValidationCode::Error(ErrorCode::EmptyScope)]
        );

        values.insert(
            SCOPES_KEY.to_string(),
            "https://www.googleapis.com/auth/gmail.readonly, https://www.googleapis.com/auth/calendar"
                .to_string(),
        );
        assert!(validate_config(&values).is_valid());
    }

    #[test]
    fn test_unknown_field_is_a_warning() {
        let mut values = valid_values();
        values.insert("extra".to_string(), "1".to_string());

        let result = validate_config(&values);
        assert!(result.is_valid());
        assert!(!result.is_strict_valid());
        assert_eq!(result.warnings[0].location, "extra");
        assert_eq!(result.warnings[0].code.to_string(), "W001");
    }

    #[test]
    fn test_code_labels() {
        let mut values = valid_values();
        values.insert(SCOPES_KEY.to_string(), ",".to_string());
        values.insert("extra".to_string(), "1".to_string());

        let result = validate_config(&values);
        assert_eq!(result.errors[0].code.label(), "error");
        assert_eq!(result.warnings[0].code.label(), "warning");
    }

    #[test]
    fn test_codes_serialize_as_strings() {
        let json = serde_json::to_value(ValidationCode::Error(ErrorCode::EmptyScope)).unwrap();
        assert_eq!(json, "E004");
    }
}
