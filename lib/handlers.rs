//! Command handlers.

mod common;
mod describe;
mod launch_cmd;
mod validate_cmd;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use describe::{print_build, print_descriptor, print_resolved, print_schema};
pub use launch_cmd::launch_server;
pub use validate_cmd::validate_config_cmd;
