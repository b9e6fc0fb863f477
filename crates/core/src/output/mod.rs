mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::{ImportType, ScriptReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The bare metadata block
    Text,
    Json,
    Yaml,
    Summary,
}

/// Format a report according to the specified format
pub fn format_report(report: &ScriptReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(report.metadata_block.clone()),
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_summary(report)),
    }
}

/// Generate a human-readable summary
pub fn format_summary(report: &ScriptReport) -> String {
    let mut output = String::new();
    let imports = &report.analysis.imports;
    let count = |kind: ImportType| imports.iter().filter(|i| i.import_type == kind).count();

    output.push_str(&format!(
        "Import Analysis Summary\n\
         =======================\n\
         Script: {}\n\
         Requires Python: {}\n\n",
        report.script.display(),
        report.python_version
    ));

    if report.analysis.failed {
        output.push_str("Script could not be parsed; no imports analyzed.\n\n");
    }

    output.push_str(&format!(
        "Total Imports: {}\n\
         - External: {}\n\
         - Stdlib: {}\n\
         - Local: {}\n\n",
        imports.len(),
        count(ImportType::External),
        count(ImportType::Stdlib),
        count(ImportType::Local),
    ));

    if report.analysis.dependencies.is_empty() {
        output.push_str("No third-party dependencies detected.\n\n");
    } else {
        output.push_str("Dependencies:\n");
        for dep in &report.analysis.dependencies {
            output.push_str(&format!("  {}\n", dep));
        }
        output.push('\n');
    }

    output.push_str(&report.metadata_block);
    output.push('\n');

    output
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
