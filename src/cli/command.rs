//! Command trait and execution context.

use crate::cli::help::CommandHelp;
use crate::cli::output::OutputFormat;
use crate::cli::registry::CommandDescriptor;
use crate::cli::slots::SlotValue;
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;

/// Settings handed to a command when it runs
#[derive(Debug, Clone, Copy, Default)]
pub struct RunContext {
    /// Format for command output
    pub format: OutputFormat,
}

/// Trait for implementing commands.
///
/// A command is created empty by its descriptor's factory, receives one
/// [`assign`](Command::assign) call per bound slot, then runs once.
#[async_trait]
pub trait Command: Send {
    /// Static metadata: name, description, declared slots.
    fn descriptor(&self) -> &'static CommandDescriptor;

    /// Store a converted value for the slot with the given declared name.
    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError>;

    /// Usage text for this command.
    fn help(&self) -> CommandHelp {
        CommandHelp::from_descriptor(self.descriptor())
    }

    /// Run the command, returning the process exit code.
    async fn run(&mut self, ctx: &RunContext) -> Result<i32, CommandError>;
}
