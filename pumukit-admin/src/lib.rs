//! Shared pieces of the `pumukit-admin` binary: argument parsing,
//! configuration loading and the commands themselves.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, EmbeddedAction, EmbeddedArgs, NewItem, NewPerson, PersonAction, PersonArgs};
pub use config::{AdminConfig, DEFAULT_CONFIG_FILE};
