// tests/workflow.rs

//! End-to-end tests over scripts on disk: analyze, generate, reconcile.

use mta_rust_pep723_core::{
    extract_existing_metadata, generate_metadata, reconcile, NullSink, Pep723Config,
    ScriptAnalyzer, ScriptMetadata,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_script(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Analyze the script and write its block back, like `add` does
fn update_in_place(path: &Path, python_version: &str) -> String {
    let config = Pep723Config::default().with_python_version(python_version);
    let mut analyzer = ScriptAnalyzer::new(config).unwrap();
    let deps = analyzer.third_party_imports(path, &NullSink);
    let block = generate_metadata(&deps, python_version);

    let content = fs::read_to_string(path).unwrap();
    let updated = reconcile(&content, &block);
    fs::write(path, &updated).unwrap();
    updated
}

#[test]
fn test_shebang_script_full_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        &dir,
        "fetch.py",
        "#!/usr/bin/env python3\n\"\"\"Fetch a page.\"\"\"\nimport json\nimport requests\nfrom PIL import Image\n\ndef main():\n    import yaml\n",
    );

    let updated = update_in_place(&path, ">=3.13");

    let expected = "#!/usr/bin/env python3\n\
        # /// script\n\
        # requires-python = \">=3.13\"\n\
        # dependencies = [\n\
        #     \"Pillow\",\n\
        #     \"PyYAML\",\n\
        #     \"requests\",\n\
        # ]\n\
        # ///\n\
        \"\"\"Fetch a page.\"\"\"\nimport json\nimport requests\nfrom PIL import Image\n\ndef main():\n    import yaml\n";
    assert_eq!(updated, expected);
}

#[test]
fn test_existing_block_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        &dir,
        "old.py",
        "# /// script\n# requires-python = \">=3.11\"\n# dependencies = [\"flask\"]\n# ///\n\nimport requests\nimport numpy as np\n",
    );

    let updated = update_in_place(&path, ">=3.13");
    let split = extract_existing_metadata(&updated);
    let metadata = ScriptMetadata::parse(split.block).unwrap();

    assert_eq!(metadata.requires_python.as_deref(), Some(">=3.13"));
    assert_eq!(metadata.dependencies, vec!["numpy", "requests"]);
    assert!(!updated.contains("3.11"));
    assert!(!updated.contains("flask"));
    assert!(updated.ends_with("# ///\n\nimport requests\nimport numpy as np\n"));
}

#[test]
fn test_second_update_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "tool.py", "import click\nimport os\n");

    let first = update_in_place(&path, ">=3.13");
    let deps_first = ScriptMetadata::parse(extract_existing_metadata(&first).block)
        .unwrap()
        .dependencies;

    let second = update_in_place(&path, ">=3.13");
    let deps_second = ScriptMetadata::parse(extract_existing_metadata(&second).block)
        .unwrap()
        .dependencies;

    assert_eq!(first, second);
    assert_eq!(deps_first, deps_second);
    assert_eq!(deps_second, vec!["click"]);
}

#[test]
fn test_unparseable_script_gets_block_without_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "broken.py", "import requests\nif True print('x')\n");

    let updated = update_in_place(&path, ">=3.13");

    assert!(updated.starts_with("# /// script\n# requires-python = \">=3.13\"\n# ///\n"));
    assert!(!updated.contains("dependencies"));
}

#[test]
fn test_stdlib_is_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "mixed.py", "import requests\nimport os\n");

    let mut analyzer = ScriptAnalyzer::new(Pep723Config::default()).unwrap();
    let deps = analyzer.third_party_imports(&path, &NullSink);

    assert_eq!(deps.as_slice(), ["requests".to_string()]);
}

#[test]
fn test_empty_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(&dir, "empty.py", "");

    let updated = update_in_place(&path, ">=3.13");

    assert_eq!(updated, "# /// script\n# requires-python = \">=3.13\"\n# ///\n");
    assert_eq!(updated.lines().count(), 3);
}
