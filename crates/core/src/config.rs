use crate::metadata::DEFAULT_PYTHON_VERSION;
use crate::runner::DEFAULT_RUNNER;
use std::path::PathBuf;

/// Configuration for analysis and execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pep723Config {
    /// `requires-python` specifier written into generated metadata
    pub python_version: String,
    /// Interpreter to ask for its stdlib module names (bundled table if unset)
    pub interpreter: Option<PathBuf>,
    /// Program used to run scripts
    pub runner: String,
}

impl Default for Pep723Config {
    fn default() -> Self {
        Self {
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            interpreter: None,
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

impl Pep723Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = version.into();
        self
    }

    pub fn with_interpreter(mut self, interpreter: PathBuf) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = runner.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Pep723Config::default();
        assert_eq!(config.python_version, ">=3.13");
        assert!(config.interpreter.is_none());
        assert_eq!(config.runner, "uv");
    }

    #[test]
    fn test_config_builder() {
        let config = Pep723Config::new()
            .with_python_version(">=3.10")
            .with_interpreter(PathBuf::from("/usr/bin/python3"))
            .with_runner("/opt/uv/bin/uv");

        assert_eq!(config.python_version, ">=3.10");
        assert_eq!(config.interpreter, Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(config.runner, "/opt/uv/bin/uv");
    }
}
