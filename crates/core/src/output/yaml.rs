use super::FormatError;
use crate::models::ScriptReport;

/// Serialize a report to YAML
pub fn to_yaml(report: &ScriptReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
