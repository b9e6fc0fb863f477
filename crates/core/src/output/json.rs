use super::FormatError;
use crate::models::ScriptReport;

/// Serialize a report to pretty-printed JSON
pub fn to_json(report: &ScriptReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_report;

    #[test]
    fn test_to_json() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dependencies"], serde_json::json!(["requests"]));
        assert_eq!(value["python_version"], ">=3.13");
        assert_eq!(value["imports"][0]["import_type"], "external");
        assert!(value["metadata"]["tool_version"].is_string());
    }
}
