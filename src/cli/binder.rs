//! Argument binding
//!
//! Assigns positional and named tokens to the slots a command declares.
//! Every check runs even after an earlier one failed, so the bound command
//! carries as much context as possible for help output. The binding
//! succeeds only if no check (including any carried in) failed.

use crate::cli::command::Command;
use crate::cli::tokenizer::NamedArgs;
use crate::error::UsageError;

/// A command with its slots assigned, plus every usage error found
pub struct Binding {
    pub command: Box<dyn Command>,
    pub errors: Vec<UsageError>,
}

impl Binding {
    /// True if every check passed
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bind tokens to `command`'s declared slots
///
/// `positional` excludes the command name. `carried` holds errors from
/// earlier stages; they are kept and make the binding fail.
pub fn bind(
    mut command: Box<dyn Command>,
    positional: &[String],
    mut named: NamedArgs,
    carried: Vec<UsageError>,
) -> Binding {
    let descriptor = command.descriptor();
    let mut errors = carried;

    for slot in descriptor.positional {
        match positional.get(slot.index) {
            Some(raw) => {
                let assigned = slot
                    .kind
                    .convert(Some(raw.as_str()))
                    .and_then(|value| command.assign(slot.name, value));
                if let Err(source) = assigned {
                    errors.push(UsageError::ValueConversionFailure {
                        slot: slot.to_string(),
                        source,
                    });
                }
            }
            None if !slot.optional => {
                errors.push(UsageError::MissingRequiredPositional(slot.name.to_string()));
            }
            None => {}
        }
    }

    if positional.len() > descriptor.positional.len() {
        errors.push(UsageError::ExcessPositionalArguments {
            expected: descriptor.positional.len(),
            actual: positional.len(),
        });
    }

    for slot in descriptor.named {
        match named.remove(slot.name) {
            Some(arg) => {
                let assigned = slot
                    .kind
                    .convert(arg.value.as_deref())
                    .and_then(|value| command.assign(slot.name, value));
                if let Err(source) = assigned {
                    errors.push(UsageError::ValueConversionFailure {
                        slot: format!("--{}", slot.name),
                        source,
                    });
                }
            }
            None if !slot.optional => {
                errors.push(UsageError::MissingRequiredNamed(slot.name.to_string()));
            }
            None => {}
        }
    }

    errors.extend(
        named
            .iter()
            .map(|arg| UsageError::UnrecognizedNamedArgument(arg.key.clone())),
    );

    for err in &errors {
        log::debug!("{}: {}", descriptor.name, err);
    }

    Binding { command, errors }
}
