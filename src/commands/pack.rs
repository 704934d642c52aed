//! Pack command implementation
//!
//! Collects the contents of a source directory for a new package.

use crate::cli::command::{Command, RunContext};
use crate::cli::output::Message;
use crate::cli::registry::CommandDescriptor;
use crate::cli::slots::{NamedSlot, PositionalSlot, SlotValue, ValueKind};
use crate::commands::{
    expect_flag, expect_text, metadata_if_exists, report, EXIT_CONFLICT, EXIT_NOT_FOUND,
};
use crate::error::{CommandError, ConversionError};

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "pack",
    description: "Creates a new universal package from a directory",
    positional: &[
        PositionalSlot::required(
            0,
            "source",
            ValueKind::Text,
            "Directory containing the files to package",
        ),
        PositionalSlot::optional(1, "manifest", ValueKind::Text, "Path to the package manifest"),
    ],
    named: &[
        NamedSlot::optional("version", ValueKind::Text, "Version to stamp on the package"),
        NamedSlot::optional(
            "targetDirectory",
            ValueKind::Text,
            "Directory the package file is written to (default: current directory)",
        ),
        NamedSlot::optional("overwrite", ValueKind::Flag, "Replace an existing package file"),
    ],
    factory: Pack::create,
};

/// `upack pack <source> [manifest]`
#[derive(Debug, Default)]
pub struct Pack {
    source: String,
    manifest: Option<String>,
    version: Option<String>,
    target_directory: Option<String>,
    overwrite: bool,
}

impl Pack {
    fn create() -> Box<dyn Command> {
        Box::new(Self::default())
    }

    /// File name of the package this command would write
    fn package_file_name(&self) -> String {
        let base = Path::new(&self.source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());

        match &self.version {
            Some(version) => format!("{}-{}.upack", base, version),
            None => format!("{}.upack", base),
        }
    }
}

#[async_trait]
impl Command for Pack {
    fn descriptor(&self) -> &'static CommandDescriptor {
        &DESCRIPTOR
    }

    fn assign(&mut self, slot: &str, value: SlotValue) -> Result<(), ConversionError> {
        match slot {
            "source" => self.source = expect_text(slot, value)?,
            "manifest" => self.manifest = Some(expect_text(slot, value)?),
            "version" => self.version = Some(expect_text(slot, value)?),
            "targetDirectory" => self.target_directory = Some(expect_text(slot, value)?),
            "overwrite" => self.overwrite = expect_flag(slot, value)?,
            _ => return Err(ConversionError::Unassignable(slot.to_string())),
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &RunContext) -> Result<i32, CommandError> {
        let source = Path::new(&self.source);

        let Some(meta) = metadata_if_exists(source).await? else {
            let message = format!("Source directory not found: {}", self.source);
            report(ctx, Message::failed(message))?;
            return Ok(EXIT_NOT_FOUND);
        };
        if !meta.is_dir() {
            return Err(CommandError::InvalidInput(format!(
                "{} is not a directory",
                self.source
            )));
        }

        if let Some(manifest) = &self.manifest {
            if metadata_if_exists(Path::new(manifest)).await?.is_none() {
                report(ctx, Message::failed(format!("Manifest not found: {}", manifest)))?;
                return Ok(EXIT_NOT_FOUND);
            }
        }

        let target_dir = PathBuf::from(self.target_directory.as_deref().unwrap_or("."));
        let package = target_dir.join(self.package_file_name());
        if !self.overwrite && metadata_if_exists(&package).await?.is_some() {
            report(
                ctx,
                Message::failed(format!(
                    "{} already exists; use --overwrite to replace it",
                    package.display()
                )),
            )?;
            return Ok(EXIT_CONFLICT);
        }

        let entries = count_entries(source).await?;
        log::info!("Collected {} entries from {}", entries, source.display());

        report(
            ctx,
            Message::ok(format!(
                "Prepared {} from {} ({} entries)",
                package.display(),
                source.display(),
                entries
            )),
        )?;
        Ok(0)
    }
}

/// Count files and directories below `root`
async fn count_entries(root: &Path) -> Result<usize, CommandError> {
    let access = |path: &Path, source: std::io::Error| CommandError::Access {
        path: path.display().to_string(),
        source,
    };

    let mut count = 0;
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| access(dir.as_path(), e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| access(dir.as_path(), e))?
        {
            count += 1;
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| access(dir.as_path(), e))?;
            if file_type.is_dir() {
                pending.push(entry.path());
            }
        }
    }

    Ok(count)
}
