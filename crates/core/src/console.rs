//! Leveled, optionally colored diagnostics.
//!
//! The sink is an ordinary value handed to whatever needs to report
//! something; there is no process-wide logger.

use std::cell::RefCell;
use std::io::Write;

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_CYAN: &str = "\x1b[96m";

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Verbose,
    Info,
    Success,
    Warning,
    Command,
    Error,
}

impl Level {
    fn color(self) -> Option<&'static str> {
        match self {
            Level::Verbose => Some(DIM),
            Level::Info => None,
            Level::Success => Some(BRIGHT_GREEN),
            Level::Warning => Some(BRIGHT_YELLOW),
            Level::Command => Some(BRIGHT_CYAN),
            Level::Error => Some(BRIGHT_RED),
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Level::Warning => "Warning: ",
            Level::Command => "🚀 Running: ",
            _ => "",
        }
    }

    /// Only shown in verbose mode
    fn is_verbose_only(self) -> bool {
        matches!(self, Level::Verbose | Level::Command)
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

/// Receiver of diagnostics
pub trait DiagnosticSink {
    fn emit(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn verbose(&self, message: &str) {
        self.emit(Level::Verbose, message);
    }

    fn command(&self, message: &str) {
        self.emit(Level::Command, message);
    }
}

/// Whether the terminal should receive ANSI colors
pub struct ColorSupport;

impl ColorSupport {
    /// Decide from the environment and stdout
    pub fn detect() -> bool {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let term = std::env::var("TERM").ok();
        Self::from_env(no_color, term.as_deref(), atty::is(atty::Stream::Stdout))
    }

    pub fn from_env(no_color: bool, term: Option<&str>, is_tty: bool) -> bool {
        if no_color || !is_tty {
            return false;
        }
        !matches!(term, None | Some("") | Some("dumb"))
    }
}

/// Console settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub verbose: bool,
    pub use_colors: bool,
}

impl ConsoleConfig {
    /// Colors detected from the environment
    pub fn detect(verbose: bool) -> Self {
        Self {
            verbose,
            use_colors: ColorSupport::detect(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Terminal sink: stdout for regular output, stderr for warnings and errors
#[derive(Debug, Clone)]
pub struct Console {
    config: ConsoleConfig,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ConsoleConfig {
        self.config
    }

    pub fn is_verbose(&self) -> bool {
        self.config.verbose
    }

    /// The line as it will be printed, or `None` when filtered out
    pub fn format(&self, level: Level, message: &str) -> Option<String> {
        if level.is_verbose_only() && !self.config.verbose {
            return None;
        }

        let text = format!("{}{}", level.prefix(), message);
        Some(match level.color() {
            Some(color) if self.config.use_colors => format!("{}{}{}", color, text, RESET),
            _ => text,
        })
    }
}

impl DiagnosticSink for Console {
    fn emit(&self, level: Level, message: &str) {
        let Some(line) = self.format(level, message) else {
            return;
        };

        // A closed pipe is not worth failing over.
        if level.to_stderr() {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        } else {
            let _ = writeln!(std::io::stdout().lock(), "{}", line);
        }
    }
}

/// Sink that records everything it receives
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, level: Level, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _level: Level, _message: &str) {}
}
