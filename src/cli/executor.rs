//! Command execution
//!
//! Runs a bound command on a single-threaded tokio runtime and blocks
//! until it finishes.

use crate::cli::command::{Command, RunContext};
use crate::error::{AppError, Result};

/// Run `command` to completion and return its exit code
///
/// No retries and no timeout. Errors raised by the command are returned
/// unchanged; panics are not caught.
pub fn execute(mut command: Box<dyn Command>, ctx: &RunContext) -> Result<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Runtime(e.to_string()))?;

    let name = command.descriptor().name;
    log::debug!("Running command {}", name);

    let code = runtime.block_on(command.run(ctx))?;

    log::debug!("Command {} finished with code {}", name, code);
    Ok(code)
}
