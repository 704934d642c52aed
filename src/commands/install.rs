//! Install command implementation
//!
//! Resolves which package version to install from which feed.

use crate::cli::command::{Command, RunContext};
use crate::cli::output::Message;
use crate::cli::registry::CommandDescriptor;
use crate::cli::slots::{NamedSlot, PositionalSlot, SlotValue, ValueKind};
use crate::commands::{expect_flag, expect_text, report, user_name, EXIT_NOT_FOUND};
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "install",
    description: "Downloads a package from a feed and installs it to a directory",
    positional: &[
        PositionalSlot::required(0, "package", ValueKind::Text, "Package name, as group/name"),
        PositionalSlot::optional(
            1,
            "version",
            ValueKind::Text,
            "Version to install (default: latest)",
        ),
    ],
    named: &[
        NamedSlot::optional("source", ValueKind::Text, "URL of the universal feed"),
        NamedSlot::optional("target", ValueKind::Text, "Directory to install into"),
        NamedSlot::optional("user", ValueKind::Text, "User name for the feed, as user:password"),
        NamedSlot::optional("prerelease", ValueKind::Flag, "Allow prerelease versions"),
    ],
    factory: Install::create,
};

/// `upack install <package> [version]`
#[derive(Debug, Default)]
pub struct Install {
    package: String,
    version: Option<String>,
    source: Option<String>,
    target: Option<String>,
    user: Option<String>,
    prerelease: bool,
}

impl Install {
    fn create() -> Box<dyn Command> {
        Box::new(Self::default())
    }

    fn version_label(&self) -> String {
        match (&self.version, self.prerelease) {
            (Some(version), _) => version.clone(),
            (None, true) => "latest (including prerelease)".to_string(),
            (None, false) => "latest".to_string(),
        }
    }
}

#[async_trait]
impl Command for Install {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError> {
        match slot {
            "package" => self.package = expect_text(slot, value)?,
            "version" => self.version = Some(expect_text(slot, value)?),
            "source" => self.source = Some(expect_text(slot, value)?),
            "target" => self.target = Some(expect_text(slot, value)?),
            "user" => self.user = Some(expect_text(slot, value)?),
            "prerelease" => self.prerelease = expect_flag(slot, value)?,
            _ => return Err(ConversionError::Unassignable(slot.to_string())),
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &RunContext) -> Result<i32, CommandError> {
        let Some(source) = &self.source else {
            report(ctx, Message::failed("No feed given; pass --source=<url>"))?;
            return Ok(EXIT_NOT_FOUND);
        };

        if self.package.split('/').any(str::is_empty) {
            return Err(CommandError::InvalidInput(format!(
                "'{}' is not a valid package name",
                self.package
            )));
        }

        let target = self.target.as_deref().unwrap_or(".");
        log::info!(
            "Installing {} {} from {} into {}",
            self.package,
            self.version_label(),
            source,
            target
        );

        let mut message = format!(
            "Resolved {} {} from {} for {}",
            self.package,
            self.version_label(),
            source,
            target
        );
        if let Some(user) = &self.user {
            message.push_str(&format!(" as {}", user_name(user)));
        }
        report(ctx, Message::ok(message))?;
        Ok(0)
    }
}
