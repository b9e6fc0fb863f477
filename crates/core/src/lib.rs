//! MTA Rust PEP 723 Core Library
//!
//! This library finds the third-party imports of a Python script and keeps
//! a PEP 723 inline metadata block in the script up to date, so that
//! `uv run` can execute it with exactly those dependencies.
//!
//! # Features
//!
//! - Parse Python imports with tree-sitter (import, from...import, nested anywhere)
//! - Filter out standard library and builtin modules
//! - Map import names to PyPI package names (`PIL` -> `Pillow`)
//! - Generate, replace or insert the `# /// script` block, keeping the shebang
//! - Run scripts through `uv run --with ...`
//!
//! # Example
//!
//! ```no_run
//! use mta_rust_pep723_core::{reconcile, generate_metadata, NullSink, Pep723Config, ScriptAnalyzer};
//! use std::path::Path;
//!
//! let mut analyzer = ScriptAnalyzer::new(Pep723Config::default()).unwrap();
//! let path = Path::new("script.py");
//! let deps = analyzer.third_party_imports(path, &NullSink);
//! let block = generate_metadata(&deps, ">=3.13");
//!
//! let content = std::fs::read_to_string(path).unwrap();
//! std::fs::write(path, reconcile(&content, &block)).unwrap();
//! ```

pub mod analyzer;
pub mod config;
pub mod console;
pub mod metadata;
pub mod models;
pub mod output;
pub mod parsers;
pub mod reconcile;
pub mod remote;
pub mod resolver;
pub mod runner;
pub mod universe;
pub mod validation;

// Re-exports for convenience
pub use analyzer::{AnalyzeError, ScriptAnalyzer};
pub use config::Pep723Config;
pub use console::{
    ColorSupport, Console, ConsoleConfig, DiagnosticSink, Level, MemorySink, NullSink,
};
pub use metadata::{generate_metadata, MetadataError, ScriptMetadata, DEFAULT_PYTHON_VERSION};
pub use models::*;
pub use output::{format_report, format_summary, FormatError, OutputFormat};
pub use reconcile::{
    extract_existing_metadata, has_existing_metadata, reconcile, BlockSplit,
};
pub use remote::{is_url, RemoteError, ScriptSource};
pub use resolver::{package_name, IMPORT_TO_PACKAGE};
pub use runner::{RunError, UvRunner};
pub use universe::{ModuleUniverse, UniverseError};
pub use validation::ValidationError;
