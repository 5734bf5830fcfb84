//! `gws-launch` library.
//!
//! Resolves the launch descriptor of the Google Workspace MCP server: a static
//! config schema, a pure resolver from config to process launch spec, and the
//! boundary pieces (validation, config loading, process start) around it.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod launch;
pub mod resolver;
pub mod schema;
pub mod styles;
pub mod validate;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use commands::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use launch::*;
pub use resolver::*;
pub use schema::*;
pub use validate::*;
