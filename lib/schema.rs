//! Config schema declaration for the launch descriptor.
//!
//! The schema is static. It is rendered as a JSON-Schema object for the host
//! platform, which uses the descriptions to generate its config UI.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{
    ACCESS_TOKEN_KEY, CLIENT_ID_KEY, CLIENT_SECRET_KEY, REFRESH_TOKEN_KEY, SCOPES_KEY,
    TOKEN_URI_KEY,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Config field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFieldType {
    /// String value.
    String,
}

/// A single declared config field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigField {
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: ConfigFieldType,
    /// Display title.
    pub title: String,
    /// Human-readable description used for UI and documentation.
    pub description: String,
    /// Whether the field is required.
    pub required: bool,
    /// Whether the value is a secret.
    pub sensitive: bool,
}

/// The declared config schema, keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSchema {
    fields: BTreeMap<String, ConfigField>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ConfigField {
    fn string(title: &str, description: &str, required: bool, sensitive: bool) -> Self {
        Self {
            field_type: ConfigFieldType::String,
            title: title.to_string(),
            description: description.to_string(),
            required,
            sensitive,
        }
    }
}

impl ConfigSchema {
    /// The schema of the Google Workspace server launch descriptor.
    pub fn google_oauth() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            CLIENT_ID_KEY.to_string(),
            ConfigField::string(
                "Client ID",
                "Google OAuth client ID from the Google Cloud Console",
                true,
                false,
            ),
        );
        fields.insert(
            CLIENT_SECRET_KEY.to_string(),
            ConfigField::string(
                "Client Secret",
                "Google OAuth client secret from the Google Cloud Console",
                true,
                true,
            ),
        );
        fields.insert(
            REFRESH_TOKEN_KEY.to_string(),
            ConfigField::string(
                "Refresh Token",
                "Google OAuth refresh token used to obtain access tokens",
                true,
                true,
            ),
        );
        fields.insert(
            ACCESS_TOKEN_KEY.to_string(),
            ConfigField::string(
                "Access Token",
                "Pre-issued Google OAuth access token (refreshed when expired)",
                false,
                true,
            ),
        );
        fields.insert(
            TOKEN_URI_KEY.to_string(),
            ConfigField::string(
                "Token URI",
                "OAuth token endpoint, must use HTTPS",
                false,
                false,
            ),
        );
        fields.insert(
            SCOPES_KEY.to_string(),
            ConfigField::string(
                "Scopes",
                "Comma-separated list of OAuth scopes",
                false,
                false,
            ),
        );
        Self { fields }
    }

    /// Iterate over all declared fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ConfigField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&ConfigField> {
        self.fields.get(name)
    }

    /// Check whether a field name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields()
            .filter(|(_, f)| f.required)
            .map(|(name, _)| name)
            .collect()
    }

    /// Render the schema as a JSON-Schema object.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, field)| {
                (
                    name.clone(),
                    json!({
                        "type": field.field_type.to_string(),
                        "title": field.title,
                        "description": field.description,
                        "sensitive": field.sensitive,
                    }),
                )
            })
            .collect();

        json!({
            "type": "object",
            "required": self.required_fields(),
            "properties": properties,
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::google_oauth()
    }
}

impl fmt::Display for ConfigFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_required_fields_are_exactly_the_oauth_triple() {
        let schema = ConfigSchema::google_oauth();
        let required: BTreeSet<&str> = schema.required_fields().into_iter().collect();
        let expected: BTreeSet<&str> = [CLIENT_ID_KEY, CLIENT_SECRET_KEY, REFRESH_TOKEN_KEY]
            .into_iter()
            .collect();
        assert_eq!(required, expected);
    }

    #[test]
    fn test_json_schema_shape() {
        let value = ConfigSchema::google_oauth().to_json_schema();
        assert_eq!(value["type"], "object");

        let required: BTreeSet<String> = value["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(required.len(), 3);
        assert!(required.contains("googleOauthRefreshToken"));

        let properties = value["properties"].as_object().unwrap();
        for (name, prop) in properties {
            assert_eq!(prop["type"], "string", "{name} should be a string");
            assert!(
                !prop["description"].as_str().unwrap().is_empty(),
                "{name} needs a description"
            );
        }
    }

    #[test]
    fn test_secrets_are_sensitive() {
        let schema = ConfigSchema::default();
        assert!(schema.get(CLIENT_SECRET_KEY).unwrap().sensitive);
        assert!(schema.get(REFRESH_TOKEN_KEY).unwrap().sensitive);
        assert!(!schema.get(CLIENT_ID_KEY).unwrap().sensitive);
        assert!(!schema.contains("somethingElse"));
    }

    #[test]
    fn test_json_schema_marks_secrets() {
        let value = ConfigSchema::default().to_json_schema();
        let properties = &value["properties"];
        assert_eq!(properties[CLIENT_SECRET_KEY]["sensitive"], true);
        assert_eq!(properties[REFRESH_TOKEN_KEY]["sensitive"], true);
        assert_eq!(properties[ACCESS_TOKEN_KEY]["sensitive"], true);
        assert_eq!(properties[CLIENT_ID_KEY]["sensitive"], false);
        assert_eq!(properties[SCOPES_KEY]["sensitive"], false);
    }
}
