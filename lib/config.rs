//! Typed OAuth config and config-source loading.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::{
    ACCESS_TOKEN_KEY, CLIENT_ID_KEY, CLIENT_SECRET_KEY, CONFIG_ENV_MAPPING, REFRESH_TOKEN_KEY,
    SCOPES_KEY, TOKEN_URI_KEY,
};
use crate::error::{LaunchError, LaunchResult};
use crate::validate::{ValidationResult, validate_config};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Schema-valid launch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    /// OAuth client ID.
    pub google_oauth_client_id: String,

    /// OAuth client secret.
    pub google_oauth_client_secret: String,

    /// OAuth refresh token.
    pub google_oauth_refresh_token: String,

    /// Pre-issued access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_oauth_access_token: Option<String>,

    /// Token endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_oauth_token_uri: Option<String>,

    /// Comma-separated scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_oauth_scopes: Option<String>,
}

/// Where raw config values come from.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigSources<'a> {
    /// `KEY=VALUE` flags (highest priority).
    pub flags: &'a [String],
    /// JSON or TOML file of string values.
    pub config_file: Option<&'a Path>,
    /// Read `GOOGLE_OAUTH_*` variables from the process environment (lowest priority).
    pub from_env: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OAuthConfig {
    /// Create a config from the three required values.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            google_oauth_client_id: client_id.into(),
            google_oauth_client_secret: client_secret.into(),
            google_oauth_refresh_token: refresh_token.into(),
            google_oauth_access_token: None,
            google_oauth_token_uri: None,
            google_oauth_scopes: None,
        }
    }

    /// Config whose values are `${config.<key>}` placeholders.
    ///
    /// Resolving it yields the descriptor template shown to platform users.
    pub fn placeholder() -> Self {
        let p = |key: &str| format!("${{config.{}}}", key);
        Self::new(
            p(CLIENT_ID_KEY),
            p(CLIENT_SECRET_KEY),
            p(REFRESH_TOKEN_KEY),
        )
    }

    /// Validate raw values and build a typed config.
    ///
    /// Unknown fields are ignored unless `strict` is set.
    pub fn from_values(values: &BTreeMap<String, String>, strict: bool) -> LaunchResult<Self> {
        let result = validate_config(values);
        if !result.is_valid() || (strict && !result.is_strict_valid()) {
            return Err(LaunchError::ValidationFailed(result));
        }
        Self::from_checked_values(values)
    }

    /// Validate raw values, returning the full result alongside the config.
    pub fn check(values: &BTreeMap<String, String>) -> (ValidationResult, Option<Self>) {
        let result = validate_config(values);
        let config = if result.is_valid() {
            Self::from_checked_values(values).ok()
        } else {
            None
        };
        (result, config)
    }

    fn from_checked_values(values: &BTreeMap<String, String>) -> LaunchResult<Self> {
        let required = |key: &str| {
            values
                .get(key)
                .cloned()
                .ok_or_else(|| LaunchError::MissingRequiredField {
                    field: key.to_string(),
                })
        };

        let optional = |key: &str| values.get(key).filter(|v| !v.is_empty()).cloned();

        Ok(Self {
            google_oauth_client_id: required(CLIENT_ID_KEY)?,
            google_oauth_client_secret: required(CLIENT_SECRET_KEY)?,
            google_oauth_refresh_token: required(REFRESH_TOKEN_KEY)?,
            google_oauth_access_token: optional(ACCESS_TOKEN_KEY),
            google_oauth_token_uri: optional(TOKEN_URI_KEY),
            google_oauth_scopes: optional(SCOPES_KEY),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Merge raw config values from all sources.
///
/// Later sources override earlier ones: environment, then file, then flags.
pub fn load_config_values(sources: ConfigSources<'_>) -> LaunchResult<BTreeMap<String, String>> {
    let mut config = BTreeMap::new();

    if sources.from_env {
        let env_values = values_from_env(|name| std::env::var(name).ok());
        tracing::debug!(keys = ?env_values.keys().collect::<Vec<_>>(), "loaded config from environment");
        config.extend(env_values);
    }

    if let Some(path) = sources.config_file {
        let file_values = load_config_file(path)?;
        tracing::debug!(path = %path.display(), count = file_values.len(), "loaded config file");
        config.extend(file_values);
    }

    config.extend(parse_config_flags(sources.flags)?);

    Ok(config)
}

/// Map `GOOGLE_OAUTH_*` variables back to config keys. Empty values are skipped.
pub fn values_from_env(lookup: impl Fn(&str) -> Option<String>) -> BTreeMap<String, String> {
    CONFIG_ENV_MAPPING
        .iter()
        .filter_map(|(key, env)| {
            lookup(env)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v))
        })
        .collect()
}

/// Parse a JSON or TOML file of string values.
///
/// The parser is picked by extension. Other files are tried as JSON, then TOML.
pub fn load_config_file(path: &Path) -> LaunchResult<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let parse_err =
        |msg: String| LaunchError::ConfigParseError(format!("{}: {}", path.display(), msg));

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Some("toml") => toml::from_str(&content).map_err(|e| parse_err(e.to_string())),
        _ => serde_json::from_str::<BTreeMap<String, String>>(&content).or_else(|json_err| {
            toml::from_str(&content).map_err(|toml_err| {
                parse_err(format!(
                    "not valid JSON ({}) or TOML ({})",
                    json_err,
                    toml_err.message()
                ))
            })
        }),
    }
}

/// Parse `KEY=VALUE` flags.
pub fn parse_config_flags(flags: &[String]) -> LaunchResult<BTreeMap<String, String>> {
    flags
        .iter()
        .map(|flag| {
            flag.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| LaunchError::InvalidConfigFlag(flag.clone()))
        })
        .collect()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
