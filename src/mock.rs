//! Mock implementations for testing
//!
//! Provides recording commands and descriptors for unit testing the
//! dispatcher without touching the file system.

use crate::cli::command::{Command, RunContext};
use crate::cli::registry::{CommandDescriptor, Registry};
use crate::cli::slots::{NamedSlot, PositionalSlot, SlotValue, ValueKind};
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;
use std::cell::RefCell;

thread_local! {
    static ASSIGNED: RefCell<Vec<(String, SlotValue)>> = const { RefCell::new(Vec::new()) };
    static RUNS: RefCell<Vec<Invocation>> = const { RefCell::new(Vec::new()) };
}

/// One recorded run of a mock command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: &'static str,
    pub values: Vec<(String, SlotValue)>,
}

impl Invocation {
    /// Value assigned to `slot`, if any
    pub fn value(&self, slot: &str) -> Option<&SlotValue> {
        self.values
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, value)| value)
    }
}

/// Drain the assignments recorded on this thread
pub fn take_assigned() -> Vec<(String, SlotValue)> {
    ASSIGNED.with(|a| std::mem::take(&mut *a.borrow_mut()))
}

/// Drain the runs recorded on this thread
pub fn take_runs() -> Vec<Invocation> {
    RUNS.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

/// Mock command that records its assignments and runs
#[derive(Debug)]
pub struct MockCommand {
    descriptor: &'static CommandDescriptor,
    values: Vec<(String, SlotValue)>,
}

impl MockCommand {
    /// Create a new mock command and reset this thread's assignment log
    pub fn new(descriptor: &'static CommandDescriptor) -> Self {
        take_assigned();
        Self {
            descriptor,
            values: Vec::new(),
        }
    }

    /// Create a boxed mock command
    pub fn boxed(descriptor: &'static CommandDescriptor) -> Box<dyn Command> {
        Box::new(Self::new(descriptor))
    }
}

#[async_trait]
impl Command for MockCommand {
    fn descriptor(&self) -> &'static CommandDescriptor {
        self.descriptor
    }

    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError> {
        if let SlotValue::Integer(n) = value {
            if n < 0 {
                return Err(ConversionError::InvalidInteger(n.to_string()));
            }
        }
        ASSIGNED.with(|a| a.borrow_mut().push((slot.to_string(), value.clone())));
        self.values.push((slot.to_string(), value));
        Ok(())
    }

    async fn run(&mut self, _ctx: &RunContext) -> Result<i32, CommandError> {
        RUNS.with(|r| {
            r.borrow_mut().push(Invocation {
                command: self.descriptor.name,
                values: self.values.clone(),
            })
        });

        if self.descriptor.name == EXPLODE.name {
            return Err(CommandError::InvalidInput("mock failure".to_string()));
        }

        let code = self
            .values
            .iter()
            .find_map(|(name, value)| match (name.as_str(), value) {
                ("code", SlotValue::Integer(n)) => Some(*n as i32),
                _ => None,
            })
            .unwrap_or(0);
        Ok(code)
    }
}

macro_rules! mock_factory {
    ($fn_name:ident, $descriptor:ident) => {
        fn $fn_name() -> Box<dyn Command> {
            MockCommand::boxed(&$descriptor)
        }
    };
}

mock_factory!(pack, PACK);
mock_factory!(push, PUSH);
mock_factory!(unpack, UNPACK);
mock_factory!(install, INSTALL);
mock_factory!(deploy, DEPLOY);
mock_factory!(explode, EXPLODE);

pub static PACK: CommandDescriptor = CommandDescriptor {
    name: "pack",
    description: "Create a package",
    positional: &[
        PositionalSlot::required(0, "source", ValueKind::Text, "Source directory"),
        PositionalSlot::optional(1, "manifest", ValueKind::Text, "Manifest file"),
    ],
    named: &[],
    factory: pack,
};

pub static PUSH: CommandDescriptor = CommandDescriptor {
    name: "push",
    description: "Push a package",
    positional: &[PositionalSlot::required(0, "package", ValueKind::Text, "Package")],
    named: &[NamedSlot::optional("source", ValueKind::Text, "Source directory")],
    factory: push,
};

pub static UNPACK: CommandDescriptor = CommandDescriptor {
    name: "unpack",
    description: "Extract a package",
    positional: &[
        PositionalSlot::required(0, "package", ValueKind::Text, "Package"),
        PositionalSlot::optional(1, "target", ValueKind::Text, "Target directory"),
    ],
    named: &[NamedSlot::optional("force", ValueKind::Flag, "Overwrite")],
    factory: unpack,
};

pub static INSTALL: CommandDescriptor = CommandDescriptor {
    name: "install",
    description: "Install a package",
    positional: &[
        PositionalSlot::required(0, "package", ValueKind::Text, "Package"),
        PositionalSlot::optional(1, "version", ValueKind::Text, "Version"),
    ],
    named: &[NamedSlot::optional("code", ValueKind::Integer, "Exit code to return")],
    factory: install,
};

pub static DEPLOY: CommandDescriptor = CommandDescriptor {
    name: "deploy",
    description: "Deploy somewhere",
    positional: &[],
    named: &[
        NamedSlot::required("target", ValueKind::Text, "Target"),
        NamedSlot::optional("retries", ValueKind::Integer, "Retry count"),
    ],
    factory: deploy,
};

pub static EXPLODE: CommandDescriptor = CommandDescriptor {
    name: "explode",
    description: "Fail while running",
    positional: &[],
    named: &[],
    factory: explode,
};

/// Registry of mock commands, in the same order as the builtin one
pub fn registry() -> Registry {
    Registry::new(vec![&PACK, &PUSH, &UNPACK, &INSTALL, &DEPLOY, &EXPLODE])
}
