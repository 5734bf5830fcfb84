//! Handlers that print descriptor pieces.

use crate::commands::ConfigArgs;
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::error::LaunchResult;
use crate::resolver::{LaunchDescriptor, build_spec, resolve};
use crate::schema::ConfigSchema;

use super::common::{has_config_source, load_config, print_json};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Print the config JSON schema.
pub async fn print_schema(concise: bool) -> LaunchResult<()> {
    print_json(&ConfigSchema::default().to_json_schema(), concise)
}

/// Print the build spec.
pub async fn print_build(concise: bool) -> LaunchResult<()> {
    print_json(&build_spec(), concise)
}

/// Validate config and print the resolved launch spec.
pub async fn print_resolved(args: ConfigArgs, concise: bool) -> LaunchResult<()> {
    let config = load_config(&args)?;
    print_json(&resolve(&config), concise)
}

/// Print the full launch descriptor.
///
/// Without any config source, including the default config file, the env map
/// holds `${config.*}` placeholders.
pub async fn print_descriptor(args: ConfigArgs, concise: bool) -> LaunchResult<()> {
    let descriptor = if has_config_source(&args, &DEFAULT_CONFIG_FILE) {
        LaunchDescriptor::for_config(&load_config(&args)?)
    } else {
        LaunchDescriptor::template()
    };
    print_json(&descriptor, concise)
}
