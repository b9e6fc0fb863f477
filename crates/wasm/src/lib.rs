//! WASM bindings for MTA Rust PEP 723
//!
//! Works on script text only: no filesystem, interpreter probe or
//! runner is available, so stdlib detection uses the bundled module table.

use mta_rust_pep723_core::{
    generate_metadata, reconcile, Level, MemorySink, ModuleUniverse, Pep723Config,
    ScriptAnalyzer,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Result envelope returned to JavaScript
#[derive(Serialize, Deserialize)]
pub struct WasmResult {
    pub success: bool,
    pub data: Option<String>,
    pub error: Option<String>,
}

impl WasmResult {
    fn ok(data: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    fn into_js(self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).unwrap_or(JsValue::NULL)
    }
}

fn analyzer(python_version: Option<String>) -> Result<ScriptAnalyzer, String> {
    let mut config = Pep723Config::new();
    if let Some(version) = python_version {
        config = config.with_python_version(version);
    }
    ScriptAnalyzer::with_universe(config, ModuleUniverse::bundled()).map_err(|e| e.to_string())
}

/// Metadata block for `source`. Unparseable source gets a block without
/// dependencies; only analyzer setup can fail.
fn metadata_for(source: &str, python_version: Option<String>) -> Result<String, String> {
    let mut analyzer = analyzer(python_version)?;
    let sink = MemorySink::new();
    let analysis = analyzer.analyze_source(source, &sink);
    let version = analyzer.config().python_version.clone();
    Ok(generate_metadata(&analysis.dependencies, &version))
}

/// Analyze script text and return the analysis as JSON
#[wasm_bindgen]
pub fn analyze_source(source: &str) -> JsValue {
    let mut analyzer = match analyzer(None) {
        Ok(analyzer) => analyzer,
        Err(e) => return WasmResult::err(e).into_js(),
    };

    let sink = MemorySink::new();
    let analysis = analyzer.analyze_source(source, &sink);
    if analysis.failed {
        let reason = sink
            .messages(Level::Error)
            .join("\n");
        return WasmResult::err(reason).into_js();
    }

    match serde_json::to_string(&analysis) {
        Ok(json) => WasmResult::ok(json).into_js(),
        Err(e) => WasmResult::err(e).into_js(),
    }
}

/// The PEP 723 block for script text
#[wasm_bindgen]
pub fn generate_metadata_for(source: &str, python_version: Option<String>) -> JsValue {
    match metadata_for(source, python_version) {
        Ok(block) => WasmResult::ok(block).into_js(),
        Err(e) => WasmResult::err(e).into_js(),
    }
}

/// Script text with its PEP 723 block inserted or replaced
#[wasm_bindgen]
pub fn reconcile_source(source: &str, python_version: Option<String>) -> JsValue {
    match metadata_for(source, python_version) {
        Ok(block) => WasmResult::ok(reconcile(source, &block)).into_js(),
        Err(e) => WasmResult::err(e).into_js(),
    }
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
