//! Process-backed implementations of the core service traits.

pub mod obabel;
pub mod vina;

pub use obabel::OpenBabel;
pub use vina::Vina;

use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;
use vinabox::engine::services::ServiceError;

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Runs `command` to completion, capturing its output, and fails on a non-zero exit.
fn run_tool(program: &Path, command: &mut Command) -> Result<Output, ServiceError> {
    let tool = tool_name(program);
    debug!(tool = %tool, "Running {:?}", command);

    let output = command.output().map_err(|source| ServiceError::Launch {
        tool: tool.clone(),
        source,
    })?;
    if !output.status.success() {
        return Err(ServiceError::Failed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

fn require_output(program: &Path, path: &Path) -> Result<(), ServiceError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ServiceError::MissingOutput {
            tool: tool_name(program),
            path: path.to_path_buf(),
        })
    }
}
