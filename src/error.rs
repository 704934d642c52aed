//! Unified error types for upack
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error raised by a subcommand while it was running
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Failed to start the async runtime for command execution
    #[error("Failed to start runtime: {0}")]
    Runtime(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Usage errors detected before a command begins executing
///
/// All of these funnel to the same outcome: help is shown and the process
/// exits with [`USAGE_ERROR_CODE`](crate::cli::USAGE_ERROR_CODE).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The same `--key` was supplied twice
    #[error("Duplicate named argument: --{0}")]
    DuplicateNamedArgument(String),

    /// No command name was given
    #[error("No command specified")]
    NoCommandSpecified,

    /// The first positional token names no registered command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required positional slot had no token
    #[error("Missing required argument: <{0}>")]
    MissingRequiredPositional(String),

    /// A required named slot was not supplied
    #[error("Missing required argument: --{0}")]
    MissingRequiredNamed(String),

    /// More positional tokens than declared slots
    #[error("Too many arguments: expected at most {expected}, got {actual}")]
    ExcessPositionalArguments { expected: usize, actual: usize },

    /// Named tokens left over after binding
    #[error("Unrecognized argument: --{0}")]
    UnrecognizedNamedArgument(String),

    /// A slot rejected its raw value
    #[error("Invalid value for {slot}: {source}")]
    ValueConversionFailure {
        slot: String,
        #[source]
        source: ConversionError,
    },
}

/// Errors from converting a raw token into a typed slot value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A value was required but only the bare flag was given
    #[error("a value is required")]
    MissingValue,

    /// Not a valid integer
    #[error("'{0}' is not a valid integer")]
    InvalidInteger(String),

    /// Not a valid boolean
    #[error("'{0}' is not a valid boolean")]
    InvalidBoolean(String),

    /// Not one of the allowed choices
    #[error("'{value}' is not one of: {allowed}")]
    InvalidChoice { value: String, allowed: String },

    /// The command does not accept a value of this shape for the slot
    #[error("unexpected value for '{0}'")]
    Unassignable(String),
}

/// Inconsistent command declarations in a registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two commands share a name, ignoring case
    #[error("Duplicate command name: {0}")]
    DuplicateCommand(String),

    /// Positional indices are not 0, 1, 2, ...
    #[error("Command '{command}': positional slot '{slot}' has index {index}, expected {expected}")]
    NonContiguousPositional {
        command: String,
        slot: String,
        index: usize,
        expected: usize,
    },

    /// A required positional follows an optional one
    #[error("Command '{command}': required positional '{slot}' follows an optional one")]
    RequiredAfterOptional { command: String, slot: String },

    /// Two named slots share a name, ignoring case
    #[error("Command '{command}': duplicate named slot '{slot}'")]
    DuplicateNamedSlot { command: String, slot: String },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Config file exists but could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors raised by subcommands while running
#[derive(Error, Debug)]
pub enum CommandError {
    /// Input path did not exist or could not be read
    #[error("Cannot access {path}: {source}")]
    Access {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input was present but not usable for the operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation did not finish in time
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Writing output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let err = UsageError::DuplicateNamedArgument("force".to_string());
        assert_eq!(err.to_string(), "Duplicate named argument: --force");
    }

    #[test]
    fn test_excess_positional_display() {
        let err = UsageError::ExcessPositionalArguments {
            expected: 2,
            actual: 3,
        };
        assert!(err.to_string().contains("at most 2"));
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_conversion_error_display() {
        let err = UsageError::ValueConversionFailure {
            slot: "--timeout".to_string(),
            source: ConversionError::InvalidInteger("soon".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for --timeout: 'soon' is not a valid integer"
        );
    }

    #[test]
    fn test_error_conversion() {
        let cmd_err = CommandError::InvalidInput("empty package".to_string());
        let app_err: AppError = cmd_err.into();
        assert!(matches!(app_err, AppError::Command(_)));
    }
}
