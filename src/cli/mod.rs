//! Argument parsing and command dispatch
//!
//! `tokenizer` → `resolver` → `binder` → `executor`, driven by `dispatcher`.

pub mod binder;
pub mod command;
pub mod dispatcher;
pub mod executor;
pub mod help;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod slots;
pub mod tokenizer;

pub use command::{Command, RunContext};
pub use dispatcher::{DispatchOutcome, Dispatcher, INTERNAL_ERROR_CODE, USAGE_ERROR_CODE};
pub use output::OutputFormat;
pub use registry::{CommandDescriptor, Registry};
