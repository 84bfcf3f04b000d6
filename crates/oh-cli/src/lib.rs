//! Office-hours tagging CLI library.
//!
//! This crate provides the CLI interface for office-hours classification.

mod cli;
pub mod commands;
mod config;
mod settings;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use settings::SettingsOverrides;
