//! layergen CLI library

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;

pub use cli::{Cli, ConflictChoice};
pub use commands::GenerateCommand;
