//! `gws-launch` is the primary CLI binary.

use clap::Parser;
use colored::Colorize;
use gws_launch::handlers;
use gws_launch::{Cli, Command, LaunchError, LaunchResult, ValidationCode};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
///
/// Errors go to stderr so a launched server keeps stdout to itself.
fn print_error(e: &LaunchError) {
    eprintln!();
    match e {
        LaunchError::ValidationFailed(result) => {
            eprintln!("  {} Validation failed", "error".bright_red().bold());
            eprintln!();
            for issue in result.errors.iter().chain(&result.warnings) {
                let label = format!("{}[{}]", issue.code.label(), issue.code);
                let label = match issue.code {
                    ValidationCode::Error(_) => label.bright_red(),
                    ValidationCode::Warning(_) => label.bright_yellow(),
                };
                eprintln!("    {} → {}", label, issue.location);
                eprintln!("      {}", issue.message);
            }
        }
        LaunchError::MissingRequiredField { field } => {
            eprintln!(
                "  {} Missing required config field {}",
                "error".bright_red().bold(),
                field.bright_white()
            );
        }
        LaunchError::InvalidConfigFlag(flag) => {
            eprintln!("  {} Invalid config flag", "error".bright_red().bold());
            eprintln!();
            eprintln!("    {}: {}", "Got".dimmed(), flag);
            eprintln!(
                "    {}: use {}",
                "hint".bright_blue().bold(),
                "-k KEY=VALUE".bright_white()
            );
        }
        LaunchError::ProcessStart { command, source } => {
            eprintln!(
                "  {} Failed to start {}",
                "error".bright_red().bold(),
                command.bright_white()
            );
            eprintln!();
            eprintln!("    {}", source);
        }
        _ => {
            let msg = e.to_string();
            if let Some((prefix, rest)) = msg.split_once(": ")
                && prefix.ends_with("error")
            {
                eprintln!(
                    "  {} {}",
                    format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                        .bright_red()
                        .bold(),
                    rest.dimmed()
                );
            } else {
                eprintln!("  {} {}", "error".bright_red().bold(), msg);
            }
        }
    }
    eprintln!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn run() -> LaunchResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema => handlers::print_schema(cli.concise).await,

        Command::Validate { config, json } => handlers::validate_config_cmd(config, json).await,

        Command::Resolve { config } => handlers::print_resolved(config, cli.concise).await,

        Command::Build => handlers::print_build(cli.concise).await,

        Command::Describe { config } => handlers::print_descriptor(config, cli.concise).await,

        Command::Launch {
            config,
            dir,
            dry_run,
        } => handlers::launch_server(config, dir, dry_run, cli.concise).await,
    }
}
