//! Shared helpers for command handlers.

use std::collections::BTreeMap;
use std::path::Path;

use crate::commands::ConfigArgs;
use crate::config::{ConfigSources, OAuthConfig, load_config_values};
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::error::LaunchResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Merge raw config values from the sources named by the CLI flags.
///
/// Falls back to the default config file when no `--config-file` is given and it exists.
pub(super) fn load_values(args: &ConfigArgs) -> LaunchResult<BTreeMap<String, String>> {
    load_config_values(ConfigSources {
        flags: &args.config,
        config_file: pick_config_file(args.config_file.as_deref(), &DEFAULT_CONFIG_FILE),
        from_env: args.from_env,
    })
}

/// The config file to read: the explicit one, else the default when it exists.
pub(super) fn pick_config_file<'a>(
    explicit: Option<&'a Path>,
    default: &'a Path,
) -> Option<&'a Path> {
    match explicit {
        Some(path) => Some(path),
        None if default.is_file() => Some(default),
        None => None,
    }
}

/// Load, validate and type the config named by the CLI flags.
pub(super) fn load_config(args: &ConfigArgs) -> LaunchResult<OAuthConfig> {
    let values = load_values(args)?;
    OAuthConfig::from_values(&values, args.strict)
}

/// Whether any config source applies, counting the default config file.
pub(super) fn has_config_source(args: &ConfigArgs, default: &Path) -> bool {
    !args.config.is_empty()
        || args.from_env
        || pick_config_file(args.config_file.as_deref(), default).is_some()
}

/// Print a serializable value as JSON, compact in concise mode.
pub(super) fn print_json<T: serde::Serialize>(value: &T, concise: bool) -> LaunchResult<()> {
    let out = if concise {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

/// Resolve a directory argument against the current directory.
pub(super) fn absolute_dir(dir: &Path) -> LaunchResult<std::path::PathBuf> {
    Ok(if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("config.json");
        let explicit = Path::new("creds.toml");

        assert_eq!(pick_config_file(None, &default), None);
        assert_eq!(pick_config_file(Some(explicit), &default), Some(explicit));

        std::fs::write(&default, "{}").unwrap();
        assert_eq!(pick_config_file(None, &default), Some(default.as_path()));
        assert_eq!(pick_config_file(Some(explicit), &default), Some(explicit));
    }

    #[test]
    fn test_default_file_counts_as_source() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("config.json");
        let args = ConfigArgs::default();

        assert!(!has_config_source(&args, &default));

        std::fs::write(&default, "{}").unwrap();
        assert!(has_config_source(&args, &default));

        let args = ConfigArgs {
            from_env: true,
            ..Default::default()
        };
        assert!(has_config_source(&args, &dir.path().join("missing.json")));
    }
}
