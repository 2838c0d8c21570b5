//! Layered configuration for the `check` command.
//!
//! Resolution order, highest first: command-line flags, `-S KEY=VALUE` overrides,
//! the TOML file given with `--config`, built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
