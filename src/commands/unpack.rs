//! Unpack command implementation
//!
//! Checks a package file and its extraction target.

use crate::cli::command::{Command, RunContext};
use crate::cli::output::Message;
use crate::cli::registry::CommandDescriptor;
use crate::cli::slots::{NamedSlot, PositionalSlot, SlotValue, ValueKind};
use crate::commands::{
    expect_flag, expect_text, metadata_if_exists, report, EXIT_CONFLICT, EXIT_NOT_FOUND,
};
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;
use std::fmt;
use std::path::Path;

const MODES: &[&str] = &["replace", "merge"];

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "unpack",
    description: "Extracts the contents of a universal package to a directory",
    positional: &[
        PositionalSlot::required(0, "package", ValueKind::Text, "Package file to extract"),
        PositionalSlot::optional(
            1,
            "target",
            ValueKind::Text,
            "Directory to extract into (default: current directory)",
        ),
    ],
    named: &[
        NamedSlot::optional("force", ValueKind::Flag, "Extract even if the target is not empty"),
        NamedSlot::optional(
            "mode",
            ValueKind::Choice(MODES),
            "Replace the target contents or merge into them",
        ),
    ],
    factory: Unpack::create,
};

/// How extracted files combine with existing ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnpackMode {
    #[default]
    Replace,
    Merge,
}

impl fmt::Display for UnpackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpackMode::Replace => write!(f, "replace"),
            UnpackMode::Merge => write!(f, "merge"),
        }
    }
}

/// `upack unpack <package> [target]`
#[derive(Debug, Default)]
pub struct Unpack {
    package: String,
    target: Option<String>,
    force: bool,
    mode: UnpackMode,
}

impl Unpack {
    fn create() -> Box<dyn Command> {
        Box::new(Self::default())
    }
}

#[async_trait]
impl Command for Unpack {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError> {
        match (slot, value) {
            ("mode", SlotValue::Choice("merge")) => self.mode = UnpackMode::Merge,
            ("mode", SlotValue::Choice("replace")) => self.mode = UnpackMode::Replace,
            ("package", value) => self.package = expect_text(slot, value)?,
            ("target", value) => self.target = Some(expect_text(slot, value)?),
            ("force", value) => self.force = expect_flag(slot, value)?,
            _ => return Err(ConversionError::Unassignable(slot.to_string())),
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &RunContext) -> Result<i32, CommandError> {
        let package = Path::new(&self.package);
        let target = Path::new(self.target.as_deref().unwrap_or("."));

        let Some(meta) = metadata_if_exists(package).await? else {
            report(ctx, Message::failed(format!("Package not found: {}", self.package)))?;
            return Ok(EXIT_NOT_FOUND);
        };
        if !meta.is_file() {
            return Err(CommandError::InvalidInput(format!(
                "{} is not a package file",
                self.package
            )));
        }

        if self.mode == UnpackMode::Replace && !self.force && has_entries(target).await? {
            report(
                ctx,
                Message::failed(format!(
                    "{} is not empty; use --force or --mode=merge",
                    target.display()
                )),
            )?;
            return Ok(EXIT_CONFLICT);
        }

        log::info!(
            "Unpacking {} into {} ({})",
            package.display(),
            target.display(),
            self.mode
        );

        report(
            ctx,
            Message::ok(format!(
                "Ready to extract {} into {} ({})",
                package.display(),
                target.display(),
                self.mode
            )),
        )?;
        Ok(0)
    }
}

/// True if `dir` exists and contains anything
async fn has_entries(dir: &Path) -> Result<bool, CommandError> {
    if metadata_if_exists(dir).await?.is_none() {
        return Ok(false);
    }

    let access = |source: std::io::Error| CommandError::Access {
        path: dir.display().to_string(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(access)?;
    Ok(entries.next_entry().await.map_err(access)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack(package: &Path, target: &Path) -> Unpack {
        Unpack {
            package: package.display().to_string(),
            target: Some(target.display().to_string()),
            ..Unpack::default()
        }
    }

    #[test]
    fn test_assign_mode() {
        let mut cmd = Unpack::default();
        let merge = ValueKind::Choice(MODES).convert(Some("Merge")).unwrap();
        cmd.assign("mode", merge).unwrap();
        assert_eq!(cmd.mode, UnpackMode::Merge);
        assert!(cmd.assign("mode", SlotValue::Flag(true)).is_err());
    }

    #[tokio::test]
    async fn test_run_missing_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = unpack(&dir.path().join("nope.upack"), dir.path());
        assert_eq!(cmd.run(&RunContext::default()).await.unwrap(), EXIT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_non_empty_target() {
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("lib.upack");
        std::fs::write(&package, b"PK").unwrap();

        // the package itself makes the target non-empty
        let mut cmd = unpack(&package, dir.path());
        assert_eq!(cmd.run(&RunContext::default()).await.unwrap(), EXIT_CONFLICT);

        cmd.force = true;
        assert_eq!(cmd.run(&RunContext::default()).await.unwrap(), 0);

        cmd.force = false;
        cmd.mode = UnpackMode::Merge;
        assert_eq!(cmd.run(&RunContext::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_run_new_target() {
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("lib.upack");
        std::fs::write(&package, b"PK").unwrap();

        let mut cmd = unpack(&package, &dir.path().join("out"));
        assert_eq!(cmd.run(&RunContext::default()).await.unwrap(), 0);
    }
}
