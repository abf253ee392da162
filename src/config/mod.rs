pub mod args;
mod r#impl;
mod structs;

pub use args::{Cli, apply_cli_overrides};
pub use r#impl::{get_config, init_config};
pub use structs::*;
