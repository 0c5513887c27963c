//! Command handlers, one module per top-level subcommand.

pub mod address;
pub mod config_cmd;
pub mod member;
pub mod util;
