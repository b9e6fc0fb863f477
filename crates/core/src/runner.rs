use crate::console::DiagnosticSink;
use crate::models::DependencyList;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Program used to install dependencies and run the script
pub const DEFAULT_RUNNER: &str = "uv";

#[derive(Error, Debug)]
pub enum RunError {
    #[error("'{0}' command not found. Please install uv first: https://github.com/astral-sh/uv")]
    NotInstalled(String),
    #[error("Failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs scripts through `uv run --with <dep>...`
#[derive(Debug, Clone)]
pub struct UvRunner {
    program: String,
}

impl Default for UvRunner {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER)
    }
}

impl UvRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program name
    pub fn command_args(
        script: &Path,
        dependencies: &DependencyList,
        script_args: &[String],
    ) -> Vec<String> {
        let mut args = vec!["run".to_string()];
        for dep in dependencies {
            args.push("--with".to_string());
            args.push(dep.clone());
        }
        args.push(script.display().to_string());
        args.extend(script_args.iter().cloned());
        args
    }

    /// The full command as shown to the user
    pub fn command_line(
        &self,
        script: &Path,
        dependencies: &DependencyList,
        script_args: &[String],
    ) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(Self::command_args(script, dependencies, script_args));
        parts.join(" ")
    }

    /// Whether `<program> --version` runs successfully
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run the script with inherited stdio and return its exit code
    pub fn run(
        &self,
        script: &Path,
        dependencies: &DependencyList,
        script_args: &[String],
        sink: &dyn DiagnosticSink,
    ) -> Result<i32, RunError> {
        sink.command(&self.command_line(script, dependencies, script_args));

        let status = Command::new(&self.program)
            .args(Self::command_args(script, dependencies, script_args))
            .status()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => RunError::NotInstalled(self.program.clone()),
                _ => RunError::Io {
                    program: self.program.clone(),
                    source,
                },
            })?;

        // Killed by a signal
        Ok(status.code().unwrap_or(1))
    }
}
