//! Push command implementation
//!
//! Checks a package file before it is pushed to a feed.

use crate::cli::command::{Command, RunContext};
use crate::cli::output::Message;
use crate::cli::registry::CommandDescriptor;
use crate::cli::slots::{NamedSlot, PositionalSlot, SlotValue, ValueKind};
use crate::commands::{expect_text, metadata_if_exists, report, user_name, EXIT_NOT_FOUND};
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "push",
    description: "Pushes a package to a universal feed",
    positional: &[PositionalSlot::required(
        0,
        "package",
        ValueKind::Text,
        "Package file to push",
    )],
    named: &[
        NamedSlot::optional("source", ValueKind::Text, "Directory the package file is read from"),
        NamedSlot::optional("user", ValueKind::Text, "User name for the feed, as user:password"),
        NamedSlot::optional("timeout", ValueKind::Integer, "Seconds to wait for the package file"),
    ],
    factory: Push::create,
};

/// `upack push <package>`
#[derive(Debug, Default)]
pub struct Push {
    package: String,
    source: Option<String>,
    user: Option<String>,
    timeout: Option<u64>,
}

impl Push {
    fn create() -> Box<dyn Command> {
        Box::new(Self::default())
    }

    fn package_path(&self) -> PathBuf {
        match &self.source {
            Some(source) => PathBuf::from(source).join(&self.package),
            None => PathBuf::from(&self.package),
        }
    }
}

#[async_trait]
impl Command for Push {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError> {
        match (slot, value) {
            ("timeout", SlotValue::Integer(secs)) => {
                let secs = u64::try_from(secs)
                    .map_err(|_| ConversionError::InvalidInteger(secs.to_string()))?;
                self.timeout = Some(secs);
            }
            ("package", value) => self.package = expect_text(slot, value)?,
            ("source", value) => self.source = Some(expect_text(slot, value)?),
            ("user", value) => self.user = Some(expect_text(slot, value)?),
            _ => return Err(ConversionError::Unassignable(slot.to_string())),
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &RunContext) -> Result<i32, CommandError> {
        let path = self.package_path();

        let lookup = metadata_if_exists(&path);
        let meta = match self.timeout {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), lookup)
                .await
                .map_err(|_| CommandError::Timeout(secs))??,
            None => lookup.await?,
        };

        let Some(meta) = meta else {
            report(ctx, Message::failed(format!("Package not found: {}", path.display())))?;
            return Ok(EXIT_NOT_FOUND);
        };
        if !meta.is_file() {
            return Err(CommandError::InvalidInput(format!(
                "{} is not a package file",
                path.display()
            )));
        }

        log::info!("Package {} is {} bytes", path.display(), meta.len());

        let mut message = format!("Validated {} ({} bytes) for push", path.display(), meta.len());
        if let Some(user) = &self.user {
            message.push_str(&format!(" as {}", user_name(user)));
        }
        report(ctx, Message::ok(message))?;
        Ok(0)
    }
}
