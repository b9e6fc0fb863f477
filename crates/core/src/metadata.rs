//! PEP 723 inline script metadata: generation and parsing.

use crate::models::DependencyList;
use crate::reconcile::{is_close_marker, is_open_marker};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default `requires-python` specifier
pub const DEFAULT_PYTHON_VERSION: &str = ">=3.13";

pub const OPEN_MARKER: &str = "# /// script";
pub const CLOSE_MARKER: &str = "# ///";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata block is missing its {0} marker")]
    MissingMarker(&'static str),
    #[error("Invalid TOML in metadata block: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Render a metadata block. The result has no trailing newline.
pub fn generate_metadata(dependencies: &DependencyList, python_version: &str) -> String {
    let mut lines = vec![
        OPEN_MARKER.to_string(),
        format!("# requires-python = \"{}\"", python_version),
    ];

    if !dependencies.is_empty() {
        lines.push("# dependencies = [".to_string());
        for dep in dependencies {
            lines.push(format!("#     \"{}\",", dep));
        }
        lines.push("# ]".to_string());
    }

    lines.push(CLOSE_MARKER.to_string());
    lines.join("\n")
}

/// Content of an existing metadata block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScriptMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ScriptMetadata {
    /// Parse a block including its marker lines.
    pub fn parse(block: &str) -> Result<Self, MetadataError> {
        let mut lines = block.lines();

        match lines.next() {
            Some(line) if is_open_marker(line) => {}
            _ => return Err(MetadataError::MissingMarker("opening")),
        }

        let mut body = Vec::new();
        let mut closed = false;
        for line in lines {
            if is_close_marker(line) {
                closed = true;
                break;
            }
            body.push(strip_comment_prefix(line));
        }

        if !closed {
            return Err(MetadataError::MissingMarker("closing"));
        }

        Ok(toml::from_str(&body.join("\n"))?)
    }
}

/// `# foo` -> `foo`, `  #` -> ``
fn strip_comment_prefix(line: &str) -> &str {
    let line = line.trim_start();
    let rest = line.strip_prefix('#').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}
