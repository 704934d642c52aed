//! Command handlers
//!
//! Each command declares its slots in a static [`CommandDescriptor`]
//! and validates its inputs before reporting the resolved operation.
//!
//! [`CommandDescriptor`]: crate::cli::CommandDescriptor

pub mod install;
pub mod pack;
pub mod push;
pub mod unpack;

pub use install::Install;
pub use pack::Pack;
pub use push::Push;
pub use unpack::Unpack;

use crate::cli::output::{print_output, Message};
use crate::cli::slots::SlotValue;
use crate::cli::RunContext;
use crate::error::{CommandError, ConversionError};

use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::Path;

/// Exit code when an input file or directory does not exist
pub const EXIT_NOT_FOUND: i32 = 2;

/// Exit code when the operation would overwrite something
pub const EXIT_CONFLICT: i32 = 3;

fn expect_text(slot: &str, value: SlotValue) -> Result<String, ConversionError> {
    match value {
        SlotValue::Text(text) => Ok(text),
        _ => Err(ConversionError::Unassignable(slot.to_string())),
    }
}

fn expect_flag(slot: &str, value: SlotValue) -> Result<bool, ConversionError> {
    match value {
        SlotValue::Flag(flag) => Ok(flag),
        _ => Err(ConversionError::Unassignable(slot.to_string())),
    }
}

/// User part of `user:password`, never the password
fn user_name(credentials: &str) -> &str {
    credentials
        .split_once(':')
        .map_or(credentials, |(name, _)| name)
}

/// Metadata for `path`, or `None` if it does not exist
async fn metadata_if_exists(path: &Path) -> Result<Option<Metadata>, CommandError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CommandError::Access {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn report(ctx: &RunContext, message: Message) -> Result<(), CommandError> {
    print_output(&message, ctx.format)?;
    Ok(())
}
