//! Command registry - static command registration and lookup.

use crate::cli::command::Command;
use crate::cli::slots::{NamedSlot, PositionalSlot};
use crate::cli::tokenizer::fold_case;
use crate::commands;
use crate::error::RegistryError;

use std::collections::HashSet;
use std::fmt;

/// Declarative metadata for one command, defined next to the command type
pub struct CommandDescriptor {
    /// Name typed by the user, matched ignoring case
    pub name: &'static str,
    /// One-line description shown in generic help
    pub description: &'static str,
    /// Positional slots in index order
    pub positional: &'static [PositionalSlot],
    /// Named slots
    pub named: &'static [NamedSlot],
    /// Creates an empty, unbound instance
    pub factory: fn() -> Box<dyn Command>,
}

impl CommandDescriptor {
    /// Check whether `name` selects this command
    pub fn matches(&self, name: &str) -> bool {
        fold_case(self.name) == fold_case(name)
    }

    /// Create a fresh instance of the command
    pub fn instantiate(&self) -> Box<dyn Command> {
        (self.factory)()
    }

    /// Check the slot declarations of this command
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen_optional = false;
        for (expected, slot) in self.positional.iter().enumerate() {
            if slot.index != expected {
                return Err(RegistryError::NonContiguousPositional {
                    command: self.name.to_string(),
                    slot: slot.name.to_string(),
                    index: slot.index,
                    expected,
                });
            }
            if seen_optional && !slot.optional {
                return Err(RegistryError::RequiredAfterOptional {
                    command: self.name.to_string(),
                    slot: slot.name.to_string(),
                });
            }
            seen_optional |= slot.optional;
        }

        let mut names = HashSet::new();
        for slot in self.named {
            if !names.insert(fold_case(slot.name)) {
                return Err(RegistryError::DuplicateNamedSlot {
                    command: self.name.to_string(),
                    slot: slot.name.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("positional", &self.positional.len())
            .field("named", &self.named.len())
            .finish()
    }
}

/// Ordered set of available commands
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<&'static CommandDescriptor>,
}

impl Registry {
    /// Create a registry from descriptors, keeping their order
    pub fn new(commands: Vec<&'static CommandDescriptor>) -> Self {
        Self { commands }
    }

    /// The commands shipped with upack
    pub fn builtin() -> Self {
        Self::new(vec![
            &commands::pack::DESCRIPTOR,
            &commands::push::DESCRIPTOR,
            &commands::unpack::DESCRIPTOR,
            &commands::install::DESCRIPTOR,
        ])
    }

    /// Find a command by name, ignoring case. First match wins.
    pub fn find(&self, name: &str) -> Option<&'static CommandDescriptor> {
        self.commands.iter().copied().find(|cmd| cmd.matches(name))
    }

    /// Iterate over commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'static CommandDescriptor> + '_ {
        self.commands.iter().copied()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands are registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Check every declaration and that command names are unique
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut names = HashSet::new();
        for cmd in &self.commands {
            if !names.insert(fold_case(cmd.name)) {
                return Err(RegistryError::DuplicateCommand(cmd.name.to_string()));
            }
            cmd.validate()?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
