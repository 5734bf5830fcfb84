//! Constants for gws-launch.
//!
//! The launch command, argument list and environment variable names are kept
//! as literals. The launched server reads exactly these names.

use std::path::PathBuf;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants: Launch
//--------------------------------------------------------------------------------------------------

/// Interpreter used to start the server.
pub const LAUNCH_COMMAND: &str = "python";

/// Arguments passed to the interpreter, in order.
pub const LAUNCH_ARGS: [&str; 3] = ["main.py", "--transport", "streamable-http"];

/// Build context directory (the repository root).
pub const BUILD_CONTEXT: &str = ".";

//--------------------------------------------------------------------------------------------------
// Constants: Config Keys
//--------------------------------------------------------------------------------------------------

/// OAuth client ID config key.
pub const CLIENT_ID_KEY: &str = "googleOauthClientId";

/// OAuth client secret config key.
pub const CLIENT_SECRET_KEY: &str = "googleOauthClientSecret";

/// OAuth refresh token config key.
pub const REFRESH_TOKEN_KEY: &str = "googleOauthRefreshToken";

/// Optional access token config key.
pub const ACCESS_TOKEN_KEY: &str = "googleOauthAccessToken";

/// Optional token endpoint config key.
pub const TOKEN_URI_KEY: &str = "googleOauthTokenUri";

/// Optional comma-separated scopes config key.
pub const SCOPES_KEY: &str = "googleOauthScopes";

//--------------------------------------------------------------------------------------------------
// Constants: Environment Variables
//--------------------------------------------------------------------------------------------------

/// Env var carrying the OAuth client ID.
pub const CLIENT_ID_ENV: &str = "GOOGLE_OAUTH_CLIENT_ID";

/// Env var carrying the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "GOOGLE_OAUTH_CLIENT_SECRET";

/// Env var carrying the OAuth refresh token.
pub const REFRESH_TOKEN_ENV: &str = "GOOGLE_OAUTH_REFRESH_TOKEN";

/// Env var carrying an optional pre-issued access token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Env var carrying an optional token endpoint override.
pub const TOKEN_URI_ENV: &str = "GOOGLE_OAUTH_TOKEN_URI";

/// Env var carrying optional comma-separated scopes.
pub const SCOPES_ENV: &str = "GOOGLE_OAUTH_SCOPES";

/// Config key to environment variable mapping, required fields first.
pub const CONFIG_ENV_MAPPING: [(&str, &str); 6] = [
    (CLIENT_ID_KEY, CLIENT_ID_ENV),
    (CLIENT_SECRET_KEY, CLIENT_SECRET_ENV),
    (REFRESH_TOKEN_KEY, REFRESH_TOKEN_ENV),
    (ACCESS_TOKEN_KEY, ACCESS_TOKEN_ENV),
    (TOKEN_URI_KEY, TOKEN_URI_ENV),
    (SCOPES_KEY, SCOPES_ENV),
];

//--------------------------------------------------------------------------------------------------
// Constants: Paths
//--------------------------------------------------------------------------------------------------

/// Name of the default config file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default home directory for gws-launch configuration.
pub static DEFAULT_HOME_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    dirs::home_dir()
        .map(|h| h.join(".gws-launch"))
        .unwrap_or_else(|| PathBuf::from(".gws-launch"))
});

/// Default config file, loaded when no `--config-file` is given.
pub static DEFAULT_CONFIG_FILE: LazyLock<PathBuf> =
    LazyLock::new(|| DEFAULT_HOME_PATH.join(CONFIG_FILE_NAME));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Look up the environment variable name for a config key.
pub fn env_var_for_key(key: &str) -> Option<&'static str> {
    CONFIG_ENV_MAPPING
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, env)| *env)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_for_key() {
        assert_eq!(env_var_for_key(CLIENT_ID_KEY), Some(CLIENT_ID_ENV));
        assert_eq!(env_var_for_key(SCOPES_KEY), Some(SCOPES_ENV));
        assert_eq!(env_var_for_key("unknown"), None);
    }

    #[test]
    fn test_launch_literals() {
        assert_eq!(LAUNCH_COMMAND, "python");
        assert_eq!(LAUNCH_ARGS, ["main.py", "--transport", "streamable-http"]);
        assert_eq!(BUILD_CONTEXT, ".");
    }
}
