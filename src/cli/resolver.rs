//! Command resolution
//!
//! Selects the command named by the first positional token.

use crate::cli::registry::{CommandDescriptor, Registry};
use crate::error::UsageError;

/// Resolve the command named by `positional[0]`, ignoring case
///
/// Matching is done on descriptor metadata, so nothing is instantiated
/// for commands that do not match.
pub fn resolve(
    positional: &[String],
    registry: &Registry,
) -> Result<&'static CommandDescriptor, UsageError> {
    let name = positional.first().ok_or(UsageError::NoCommandSpecified)?;

    registry
        .find(name)
        .ok_or_else(|| UsageError::UnknownCommand(name.clone()))
}
