use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Classification of an imported module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportType {
    /// Needs a package installed from PyPI
    External,
    /// Part of the module universe (stdlib or interpreter builtin)
    Stdlib,
    /// Relative import with no module after the dots (`from . import x`)
    Local,
    /// Not classified yet
    Unknown,
}

impl Default for ImportType {
    fn default() -> Self {
        ImportType::Unknown
    }
}

/// Syntactic form of an import statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import x`, `import x.y as z`
    Import,
    /// `from x import y`
    From,
    /// `from __future__ import y`
    Future,
}

/// A single import occurrence found in a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    /// The module path as written (`os.path`, `.utils`, `.`)
    pub module: String,
    /// Specific items imported (e.g., `from foo import bar, baz`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    /// Syntactic form
    pub kind: ImportKind,
    /// Line number in source file
    pub line: usize,
    /// Column position
    pub column: usize,
    /// Full import statement text
    pub raw: String,
    /// Categorization
    pub import_type: ImportType,
    /// Alias if any (e.g., `import numpy as np`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportStatement {
    /// First dotted component of the module path. Leading dots of a
    /// relative import are skipped, so `.models.user` gives `models`; a bare
    /// `.` or `..` gives `None`.
    pub fn top_level_name(&self) -> Option<&str> {
        self.module
            .trim_start_matches('.')
            .split('.')
            .next()
            .filter(|name| !name.is_empty())
    }
}

/// Sorted, duplicate-free list of installable package names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyList(Vec<String>);

impl DependencyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|dep| dep == name)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for DependencyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let unique: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        Self(unique.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DependencyList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DependencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Outcome of analyzing one script's text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Every import occurrence, classified
    pub imports: Vec<ImportStatement>,
    /// Top-level names filtered out as part of the module universe
    pub stdlib_modules: Vec<String>,
    /// Resolved third-party packages
    pub dependencies: DependencyList,
    /// Whether the text failed to parse or could not be read
    #[serde(default)]
    pub failed: bool,
}

/// Serializable result of the `check` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Script that was analyzed (the downloaded copy for remote scripts)
    pub script: PathBuf,
    /// `requires-python` specifier used for generation
    pub python_version: String,
    /// Import analysis
    #[serde(flatten)]
    pub analysis: Analysis,
    /// Generated metadata block
    pub metadata_block: String,
    /// Report metadata
    pub metadata: ReportMetadata,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(module: &str) -> ImportStatement {
        ImportStatement {
            module: module.to_string(),
            items: vec![],
            kind: ImportKind::Import,
            line: 1,
            column: 0,
            raw: format!("import {}", module),
            import_type: ImportType::Unknown,
            alias: None,
        }
    }

    #[test]
    fn test_top_level_name() {
        assert_eq!(statement("os").top_level_name(), Some("os"));
        assert_eq!(statement("a.b.c").top_level_name(), Some("a"));
        assert_eq!(statement(".").top_level_name(), None);
        assert_eq!(statement("..").top_level_name(), None);
        assert_eq!(statement("..config").top_level_name(), Some("config"));
        assert_eq!(statement(".models.user").top_level_name(), Some("models"));
    }

    #[test]
    fn test_dependency_list_sorted_and_unique() {
        let deps: DependencyList = ["requests", "numpy", "requests", "Pillow"]
            .into_iter()
            .collect();

        assert_eq!(deps.as_slice(), ["Pillow", "numpy", "requests"]);
        assert_eq!(deps.to_string(), "Pillow, numpy, requests");
        assert!(deps.contains("numpy"));
    }

    #[test]
    fn test_dependency_list_serializes_as_plain_list() {
        let deps: DependencyList = ["flask"].into_iter().collect();
        assert_eq!(serde_json::to_string(&deps).unwrap(), r#"["flask"]"#);
    }
}
