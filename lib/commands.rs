//! CLI command definitions.

use crate::styles::styles;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CLI_EXAMPLES: &str = "\
Examples:
  gws-launch schema                          Print the config JSON schema
  gws-launch validate --from-env             Check GOOGLE_OAUTH_* variables
  gws-launch resolve -k googleOauthClientId=abc -k googleOauthClientSecret=xyz \\
                     -k googleOauthRefreshToken=tok123
  gws-launch describe                        Print the descriptor template
  gws-launch launch --config-file creds.json --dir ./server";

const VALIDATE_EXAMPLES: &str = "\
Examples:
  gws-launch validate --config-file creds.json   Validate a config file
  gws-launch validate --from-env --strict        Treat unknown fields as errors
  gws-launch validate --json                     JSON output for CI/CD";

const LAUNCH_EXAMPLES: &str = "\
Examples:
  gws-launch launch --from-env                   Start the server in the current directory
  gws-launch launch --from-env --dir ./server    Start from another build context
  gws-launch launch --from-env --dry-run         Print what would be started";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// gws-launch - Resolve the Google Workspace MCP server launch descriptor.
#[derive(Debug, Parser)]
#[command(name = "gws-launch", author, version, styles=styles())]
#[command(about = "Resolve and launch the Google Workspace MCP server", after_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Concise output (compact JSON, no decoration).
    #[arg(short, long, global = true)]
    pub concise: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Config source flags shared by commands that take configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Configuration values (KEY=VALUE).
    #[arg(short = 'k', long = "config", value_name = "KEY=VALUE")]
    pub config: Vec<String>,

    /// Path to config file (JSON or TOML). Defaults to ~/.gws-launch/config.json if present.
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Read GOOGLE_OAUTH_* variables from the environment.
    #[arg(long)]
    pub from_env: bool,

    /// Reject fields not declared in the schema.
    #[arg(long)]
    pub strict: bool,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the config schema as JSON Schema.
    Schema,

    /// Validate configuration against the schema.
    #[command(after_help = VALIDATE_EXAMPLES)]
    Validate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve configuration into a launch spec.
    Resolve {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the build spec.
    Build,

    /// Print the full launch descriptor (templated when no config source or default config file exists).
    Describe {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Resolve configuration and start the server.
    #[command(after_help = LAUNCH_EXAMPLES)]
    Launch {
        #[command(flatten)]
        config: ConfigArgs,

        /// Build context directory to start the server in.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Print the launch spec without starting anything.
        #[arg(long)]
        dry_run: bool,
    },
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch() {
        let cli = Cli::try_parse_from([
            "gws-launch",
            "launch",
            "-k",
            "googleOauthClientId=abc",
            "--from-env",
            "--dir",
            "srv",
            "--dry-run",
        ])
        .unwrap();

        let Command::Launch {
            config,
            dir,
            dry_run,
        } = cli.command
        else {
            panic!("expected launch command");
        };
        assert_eq!(config.config, vec!["googleOauthClientId=abc"]);
        assert!(config.from_env);
        assert!(!config.strict);
        assert_eq!(dir, PathBuf::from("srv"));
        assert!(dry_run);
    }

    #[test]
    fn test_global_concise_flag() {
        let cli = Cli::try_parse_from(["gws-launch", "build", "-c"]).unwrap();
        assert!(cli.concise);
        assert!(matches!(cli.command, Command::Build));
    }
}
