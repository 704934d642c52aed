//! upack - universal package command-line tool
//!
//! This library provides argument parsing and subcommand dispatch for the
//! `upack` binary, plus the built-in `pack`, `push`, `unpack` and `install`
//! commands.
//!
//! # Modules
//!
//! - [`cli`]: Tokenizing, command resolution, binding and dispatch
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`error`]: Error types

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

#[cfg(test)]
pub mod mock;

pub use cli::{Dispatcher, Registry};
pub use error::{AppError, Result};
