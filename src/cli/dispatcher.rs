//! Command dispatch
//!
//! Tokenize, resolve, bind, then either execute the command or show help.
//! Any usage error ends in help and [`USAGE_ERROR_CODE`].

use crate::cli::binder::bind;
use crate::cli::command::{Command, RunContext};
use crate::cli::executor::execute;
use crate::cli::help::GenericHelp;
use crate::cli::output::{write_output, OutputFormat};
use crate::cli::registry::Registry;
use crate::cli::resolver::resolve;
use crate::cli::tokenizer::{tokenize, Tokenized};
use crate::error::{Result, UsageError};

use std::fmt;
use std::io::{self, Write};

/// Exit code for every usage error
pub const USAGE_ERROR_CODE: i32 = 1;

/// Exit code when a command fails while running
pub const INTERNAL_ERROR_CODE: i32 = 70;

/// Result of tokenizing, resolving and binding one argument vector
pub enum DispatchOutcome {
    /// Bound without errors; ready to execute
    Ready(Box<dyn Command>),
    /// At least one usage error. `command` is set if one was identified.
    Help {
        command: Option<Box<dyn Command>>,
        errors: Vec<UsageError>,
    },
}

impl DispatchOutcome {
    /// True if the command can be executed
    pub fn is_ready(&self) -> bool {
        matches!(self, DispatchOutcome::Ready(_))
    }

    /// Name of the identified command, if any
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            DispatchOutcome::Ready(cmd) => Some(cmd.descriptor().name),
            DispatchOutcome::Help { command, .. } => {
                command.as_ref().map(|cmd| cmd.descriptor().name)
            }
        }
    }

    /// Usage errors found, empty when ready
    pub fn errors(&self) -> &[UsageError] {
        match self {
            DispatchOutcome::Ready(_) => &[],
            DispatchOutcome::Help { errors, .. } => errors,
        }
    }
}

impl fmt::Debug for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOutcome::Ready(_) => f
                .debug_tuple("Ready")
                .field(&self.command_name().unwrap_or_default())
                .finish(),
            DispatchOutcome::Help { errors, .. } => f
                .debug_struct("Help")
                .field("command", &self.command_name())
                .field("errors", errors)
                .finish(),
        }
    }
}

/// Dispatches argument vectors to registered commands
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
    context: RunContext,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            context: RunContext::default(),
        }
    }

    /// Set the output format for help and command output
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.context.format = format;
        self
    }

    /// The registry commands are resolved against
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tokenize, resolve and bind `args`, which exclude the program name
    ///
    /// Binding is attempted whenever a command was identified, even if
    /// tokenizing already failed, so help has the most context.
    pub fn dispatch<I, S>(&self, args: I) -> DispatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Tokenized { args, mut errors } = tokenize(args);

        let descriptor = match resolve(&args.positional, &self.registry) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                log::debug!("{}", err);
                errors.push(err);
                return DispatchOutcome::Help {
                    command: None,
                    errors,
                };
            }
        };
        log::debug!("Resolved command {}", descriptor.name);

        let binding = bind(
            descriptor.instantiate(),
            &args.positional[1..],
            args.named,
            errors,
        );

        if binding.is_ok() {
            DispatchOutcome::Ready(binding.command)
        } else {
            DispatchOutcome::Help {
                command: Some(binding.command),
                errors: binding.errors,
            }
        }
    }

    /// Dispatch a full argument vector (program name first) and return the exit code
    ///
    /// Usage errors print to stderr, followed by command help or generic help,
    /// and yield [`USAGE_ERROR_CODE`]. Errors raised by the running command are
    /// returned as `Err`.
    pub fn main<I, S>(&self, args: I) -> Result<i32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let code = match self.dispatch(args.into_iter().skip(1)) {
            DispatchOutcome::Ready(command) => execute(command, &self.context)?,
            DispatchOutcome::Help { command, errors } => {
                for err in &errors {
                    eprintln!("Error: {}", err);
                }
                self.help_shown(&mut io::stdout().lock(), command.as_deref())
            }
        };

        log::debug!("Exit code {}", code);
        Ok(code)
    }

    /// Print the list of registered commands
    pub fn show_generic_help(&self) -> io::Result<()> {
        self.write_help(&mut io::stdout().lock(), None)
    }

    /// Print help for one command
    pub fn show_help(&self, command: &dyn Command) -> io::Result<()> {
        self.write_help(&mut io::stdout().lock(), Some(command))
    }

    /// Write command help, or generic help without a command, to `out`
    pub fn write_help<W: Write>(
        &self,
        out: &mut W,
        command: Option<&dyn Command>,
    ) -> io::Result<()> {
        match command {
            Some(command) => write_output(out, &command.help(), self.context.format),
            None => write_output(
                out,
                &GenericHelp::from_registry(&self.registry),
                self.context.format,
            ),
        }
    }

    /// Show help after a usage error. The exit code is the usage code even
    /// if the help could not be written.
    fn help_shown<W: Write>(&self, out: &mut W, command: Option<&dyn Command>) -> i32 {
        if let Err(e) = self.write_help(out, command) {
            log::warn!("Failed to write help: {}", e);
        }
        USAGE_ERROR_CODE
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}
