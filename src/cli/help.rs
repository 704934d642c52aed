//! Help output
//!
//! Generic help lists every registered command; command help describes one
//! command's arguments. Both render through [`TableDisplay`].

use crate::cli::output::TableDisplay;
use crate::cli::registry::{CommandDescriptor, Registry};

use serde::Serialize;

/// Program name shown in usage lines
pub const PROGRAM_NAME: &str = "upack";

/// One entry in the generic command list
#[derive(Debug, Clone, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub description: String,
}

/// Usage plus the list of available commands
#[derive(Debug, Clone, Serialize)]
pub struct GenericHelp {
    pub usage: String,
    pub commands: Vec<CommandSummary>,
}

impl GenericHelp {
    /// Build from a registry, keeping registration order
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            usage: format!("{} <command>", PROGRAM_NAME),
            commands: registry
                .iter()
                .map(|cmd| CommandSummary {
                    name: cmd.name.to_string(),
                    description: cmd.description.to_string(),
                })
                .collect(),
        }
    }
}

impl TableDisplay for GenericHelp {
    fn to_table(&self) -> String {
        let mut output = format!("Usage: {}\n\n", self.usage);
        for cmd in &self.commands {
            output.push_str(&format!("{} - {}\n", cmd.name, cmd.description));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.commands
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One argument line in command help
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentHelp {
    pub syntax: String,
    pub description: String,
    pub required: bool,
}

/// Usage and arguments of a single command
#[derive(Debug, Clone, Serialize)]
pub struct CommandHelp {
    pub name: String,
    pub usage: String,
    pub description: String,
    pub arguments: Vec<ArgumentHelp>,
}

impl CommandHelp {
    /// Build from a descriptor's slot declarations
    pub fn from_descriptor(descriptor: &CommandDescriptor) -> Self {
        let mut usage = vec![PROGRAM_NAME.to_string(), descriptor.name.to_string()];
        let mut arguments = Vec::new();

        for slot in descriptor.positional {
            usage.push(slot.to_string());
            arguments.push(ArgumentHelp {
                syntax: slot.to_string(),
                description: slot.description.to_string(),
                required: !slot.optional,
            });
        }

        for slot in descriptor.named {
            usage.push(slot.to_string());
            arguments.push(ArgumentHelp {
                syntax: slot.to_string(),
                description: slot.description.to_string(),
                required: !slot.optional,
            });
        }

        Self {
            name: descriptor.name.to_string(),
            usage: usage.join(" "),
            description: descriptor.description.to_string(),
            arguments,
        }
    }
}

impl TableDisplay for CommandHelp {
    fn to_table(&self) -> String {
        let mut output = format!("Usage: {}\n\n{}\n", self.usage, self.description);

        if !self.arguments.is_empty() {
            let width = self
                .arguments
                .iter()
                .map(|a| a.syntax.len())
                .max()
                .unwrap_or(0);
            output.push_str("\nArguments:\n");
            for arg in &self.arguments {
                output.push_str(&format!(
                    "  {:<width$}  {}\n",
                    arg.syntax,
                    arg.description,
                    width = width
                ));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        self.usage.clone()
    }
}
