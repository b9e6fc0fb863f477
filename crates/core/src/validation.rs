use crate::console::DiagnosticSink;
use crate::runner::UvRunner;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Script '{}' does not exist.", .0.display())]
    ScriptNotFound(PathBuf),
    #[error("'{0}' is not installed or not available in PATH. Please install uv: https://github.com/astral-sh/uv")]
    RunnerNotFound(String),
}

pub fn validate_script_exists(path: &Path) -> Result<(), ValidationError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ValidationError::ScriptNotFound(path.to_path_buf()))
    }
}

/// Warn when the script does not end in `.py`. Returns whether it does.
pub fn check_script_extension(path: &Path, sink: &dyn DiagnosticSink) -> bool {
    let is_python = path.extension().is_some_and(|ext| ext == "py");
    if !is_python {
        sink.warning(&format!("'{}' does not have a .py extension.", path.display()));
    }
    is_python
}

pub fn validate_runner_available(runner: &UvRunner) -> Result<(), ValidationError> {
    if runner.is_available() {
        Ok(())
    } else {
        Err(ValidationError::RunnerNotFound(runner.program().to_string()))
    }
}

/// Existence check plus extension warning
pub fn validate_script(path: &Path, sink: &dyn DiagnosticSink) -> Result<(), ValidationError> {
    validate_script_exists(path)?;
    check_script_extension(path, sink);
    Ok(())
}
