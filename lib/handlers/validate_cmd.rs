//! Config validation command handler.

use colored::Colorize;

use crate::commands::ConfigArgs;
use crate::error::LaunchResult;
use crate::validate::{ValidationResult, validate_config};

use super::common::load_values;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate config from the given sources and report issues.
pub async fn validate_config_cmd(args: ConfigArgs, json_output: bool) -> LaunchResult<()> {
    let values = load_values(&args)?;
    let result = validate_config(&values);

    if json_output {
        output_json(&result)?;
    } else {
        output_full(&result, args.strict);
    }

    check_exit_status(&result, args.strict);
    Ok(())
}

/// Output validation result as JSON.
fn output_json(result: &ValidationResult) -> LaunchResult<()> {
    let output = serde_json::json!({
        "valid": result.is_valid(),
        "strict_valid": result.is_strict_valid(),
        "errors": result.errors,
        "warnings": result.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Output validation result in full format.
fn output_full(result: &ValidationResult, strict: bool) {
    println!("  Validating {}\n", "config".bold());

    let warning_severity = if strict { "error" } else { "warning" };
    let all_issues = result
        .errors
        .iter()
        .map(|e| ("error", e))
        .chain(result.warnings.iter().map(|w| (warning_severity, w)));

    for (severity, issue) in all_issues {
        let label = if severity == "error" {
            format!("error[{}]", issue.code).bright_red().bold()
        } else {
            format!("warning[{}]", issue.code).bright_yellow().bold()
        };
        println!("  {}: → {}", label, issue.location.bold());

        if let Some(help) = &issue.help {
            println!("      {} {}", "├─".dimmed(), issue.message.dimmed());
            println!(
                "      {} {}: {}",
                "└─".dimmed(),
                "help".bright_green().dimmed(),
                help.dimmed()
            );
        } else {
            println!("      {} {}", "└─".dimmed(), issue.message.dimmed());
        }
        println!();
    }

    let error_count = result.errors.len();
    let warning_count = result.warnings.len();
    let failing = if strict {
        error_count + warning_count
    } else {
        error_count
    };

    if failing > 0 {
        println!(
            "  {} {}{}",
            "✗".bright_red(),
            plural(failing, "error"),
            if strict { " (strict mode)" } else { "" }
        );
    } else if warning_count > 0 {
        println!(
            "  {} valid ({})",
            "✓".bright_green(),
            plural(warning_count, "warning")
        );
    } else {
        println!("  {} valid", "✓".bright_green());
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Exit with error status if validation failed.
fn check_exit_status(result: &ValidationResult, strict: bool) {
    let ok = if strict {
        result.is_strict_valid()
    } else {
        result.is_valid()
    };
    if !ok {
        std::process::exit(1);
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "error"), "1 error");
        assert_eq!(plural(3, "warning"), "3 warnings");
    }
}
