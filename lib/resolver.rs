//! Launch descriptor resolution.
//!
//! Maps a schema-valid [`OAuthConfig`] to the process launch and build
//! instructions consumed by the hosting platform. Resolution is pure: it starts
//! nothing, reads nothing, and performs no validation of its own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::OAuthConfig;
use crate::constants::{
    ACCESS_TOKEN_ENV, BUILD_CONTEXT, CLIENT_ID_ENV, CLIENT_SECRET_ENV, CONFIG_ENV_MAPPING,
    LAUNCH_ARGS, LAUNCH_COMMAND, REFRESH_TOKEN_ENV, SCOPES_ENV, TOKEN_URI_ENV,
};
use crate::schema::ConfigSchema;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Process launch specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Executable to invoke.
    pub command: String,
    /// Ordered argument list.
    pub args: Vec<String>,
    /// Environment variables for the child process.
    pub env: BTreeMap<String, String>,
}

/// Image build specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    /// Build context directory.
    #[serde(rename = "dockerBuildPath")]
    pub context: String,
}

/// Channel the orchestrator uses to talk to the launched process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Standard input/output.
    #[default]
    Stdio,
}

/// Start instructions: transport, config schema and resolved launch spec.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCommand {
    #[serde(rename = "type")]
    pub transport: Transport,
    pub config_schema: serde_json::Value,
    pub launch: LaunchSpec,
}

/// Complete launch descriptor: build plus start instructions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchDescriptor {
    pub build: BuildSpec,
    pub start_command: StartCommand,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LaunchSpec {
    /// Render as a single shell-like command line (env values omitted).
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Env map with the values of sensitive schema fields masked.
    pub fn redacted_env(&self, schema: &ConfigSchema) -> BTreeMap<String, String> {
        self.env
            .iter()
            .map(|(name, value)| {
                let sensitive = CONFIG_ENV_MAPPING
                    .iter()
                    .find(|(_, env)| env == name)
                    .and_then(|(key, _)| schema.get(key))
                    .is_some_and(|field| field.sensitive);
                let shown = if sensitive { "****" } else { value.as_str() };
                (name.clone(), shown.to_string())
            })
            .collect()
    }
}

impl LaunchDescriptor {
    /// Descriptor for a concrete config.
    pub fn for_config(config: &OAuthConfig) -> Self {
        Self {
            build: build_spec(),
            start_command: StartCommand {
                transport: Transport::Stdio,
                config_schema: ConfigSchema::default().to_json_schema(),
                launch: resolve(config),
            },
        }
    }

    /// Descriptor with `${config.<key>}` placeholders in the env map.
    pub fn template() -> Self {
        Self::for_config(&OAuthConfig::placeholder())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolve a config into a launch spec.
///
/// Each config value is copied verbatim into its fixed env var. Optional values
/// only appear in the env map when set.
pub fn resolve(config: &OAuthConfig) -> LaunchSpec {
    let mut env = BTreeMap::new();
    env.insert(
        CLIENT_ID_ENV.to_string(),
        config.google_oauth_client_id.clone(),
    );
    env.insert(
        CLIENT_SECRET_ENV.to_string(),
        config.google_oauth_client_secret.clone(),
    );
    env.insert(
        REFRESH_TOKEN_ENV.to_string(),
        config.google_oauth_refresh_token.clone(),
    );

    let optional = [
        (ACCESS_TOKEN_ENV, &config.google_oauth_access_token),
        (TOKEN_URI_ENV, &config.google_oauth_token_uri),
        (SCOPES_ENV, &config.google_oauth_scopes),
    ];
    for (name, value) in optional {
        if let Some(v) = value {
            env.insert(name.to_string(), v.clone());
        }
    }

    tracing::debug!(env = ?env.keys().collect::<Vec<_>>(), "resolved launch spec");

    LaunchSpec {
        command: LAUNCH_COMMAND.to_string(),
        args: LAUNCH_ARGS.iter().map(|a| a.to_string()).collect(),
        env,
    }
}

/// The build spec. Always the repository root.
pub fn build_spec() -> BuildSpec {
    BuildSpec {
        context: BUILD_CONTEXT.to_string(),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_example() {
        let spec = resolve(&OAuthConfig::new("abc", "xyz", "tok123"));

        let expected: LaunchSpec = serde_json::from_value(serde_json::json!({
            "command": "python",
            "args": ["main.py", "--transport", "streamable-http"],
            "env": {
                "GOOGLE_OAUTH_CLIENT_ID": "abc",
                "GOOGLE_OAUTH_CLIENT_SECRET": "xyz",
                "GOOGLE_OAUTH_REFRESH_TOKEN": "tok123"
            }
        }))
        .unwrap();
        assert_eq!(spec, expected);
    }

    #[test]
    fn test_env_copies_values_verbatim() {
        let configs = [
            OAuthConfig::new("a", "b", "c"),
            OAuthConfig::new(" padded ", "with=equals", "1//0g-token.with.dots"),
            OAuthConfig::new("ünïcödé", "${not_a_template}", "line\nbreak"),
        ];

        for config in &configs {
            let spec = resolve(config);
            assert_eq!(spec.env[CLIENT_ID_ENV], config.google_oauth_client_id);
            assert_eq!(spec.env[CLIENT_SECRET_ENV], config.google_oauth_client_secret);
            assert_eq!(spec.env[REFRESH_TOKEN_ENV], config.google_oauth_refresh_token);
            assert_eq!(spec.env.len(), 3);
        }
    }

    #[test]
    fn test_command_and_args_are_constant() {
        let a = resolve(&OAuthConfig::new("a", "b", "c"));
        let b = resolve(&OAuthConfig::new("x", "y", "z"));
        assert_eq!(a.command, "python");
        assert_eq!(a.args, vec!["main.py", "--transport", "streamable-http"]);
        assert_eq!(a.command, b.command);
        assert_eq!(a.args, b.args);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let config = OAuthConfig::new("abc", "xyz", "tok123");
        assert_eq!(resolve(&config), resolve(&config));
    }

    #[test]
    fn test_optional_values_are_passed_through() {
        let mut config = OAuthConfig::new("abc", "xyz", "tok123");
        config.google_oauth_token_uri = Some("https://oauth2.googleapis.com/token".to_string());
        config.google_oauth_scopes = Some("a,b".to_string());

        let spec = resolve(&config);
        assert_eq!(spec.env.len(), 5);
        assert_eq!(spec.env[TOKEN_URI_ENV], "https://oauth2.googleapis.com/token");
        assert_eq!(spec.env[SCOPES_ENV], "a,b");
        assert!(!spec.env.contains_key(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn test_build_spec() {
        assert_eq!(build_spec().context, ".");
        let json = serde_json::to_value(build_spec()).unwrap();
        assert_eq!(json, serde_json::json!({ "dockerBuildPath": "." }));
    }

    #[test]
    fn test_command_line() {
        let spec = resolve(&OAuthConfig::new("a", "b", "c"));
        assert_eq!(spec.command_line(), "python main.py --transport streamable-http");
    }

    #[test]
    fn test_template_descriptor() {
        let descriptor = LaunchDescriptor::template();
        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["build"]["dockerBuildPath"], ".");
        assert_eq!(json["startCommand"]["type"], "stdio");
        assert_eq!(
            json["startCommand"]["launch"]["env"]["GOOGLE_OAUTH_REFRESH_TOKEN"],
            "${config.googleOauthRefreshToken}"
        );
        assert_eq!(json["startCommand"]["configSchema"]["type"], "object");
    }

    #[test]
    fn test_redacted_env_masks_secrets() {
        let spec = resolve(&OAuthConfig::new("abc", "xyz", "tok123"));
        let env = spec.redacted_env(&ConfigSchema::default());

        assert_eq!(env[CLIENT_ID_ENV], "abc");
        assert_eq!(env[CLIENT_SECRET_ENV], "****");
        assert_eq!(env[REFRESH_TOKEN_ENV], "****");
        assert_eq!(env.len(), spec.env.len());
    }
}
