use anyhow::{Context, Result};
use mta_rust_pep723_core::validation::{validate_runner_available, validate_script, validate_script_exists};
use mta_rust_pep723_core::{
    extract_existing_metadata, format_report, generate_metadata, reconcile, Console,
    DependencyList, DiagnosticSink, OutputFormat, Pep723Config, ScriptAnalyzer, ScriptMetadata,
    ScriptSource, UvRunner,
};
use std::fs;
use std::path::Path;

fn analyzer(config: &Pep723Config) -> Result<ScriptAnalyzer> {
    ScriptAnalyzer::new(config.clone()).context("Failed to initialize import analyzer")
}

fn resolve(script: &str, console: &Console) -> Result<ScriptSource> {
    ScriptSource::resolve(script, console, console.is_verbose())
        .with_context(|| format!("Failed to fetch {}", script))
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Dependencies to pass as `--with` for one snapshot of the script text.
/// A script with its own block gets none; uv reads the block itself.
fn run_dependencies(
    content: &str,
    config: &Pep723Config,
    console: &Console,
) -> Result<DependencyList> {
    let split = extract_existing_metadata(content);
    if split.has_block() {
        console.info("Script already has PEP 723 metadata. Using existing dependencies.");
        match ScriptMetadata::parse(split.block) {
            Ok(existing) if !existing.dependencies.is_empty() => {
                console.verbose(&format!("Declared dependencies: {}", existing.dependencies.join(", ")));
            }
            Ok(_) => {}
            Err(e) => console.warning(&format!("Existing metadata is not valid: {}", e)),
        }
        return Ok(DependencyList::new());
    }

    let dependencies = analyzer(config)?.analyze_source(content, console).dependencies;
    report_dependencies(
        console,
        "Detected dependencies",
        &dependencies,
        "No third-party dependencies detected.",
    );
    Ok(dependencies)
}

fn report_dependencies(console: &Console, label: &str, dependencies: &DependencyList, none: &str) {
    if dependencies.is_empty() {
        console.info(none);
    } else {
        console.info(&format!("{}: {}", label, dependencies));
    }
}

/// Default command: run the script through uv with detected dependencies.
/// Returns the script's exit code.
pub fn run_script_command(
    script: &str,
    script_args: &[String],
    config: &Pep723Config,
    console: &Console,
) -> Result<i32> {
    let runner = UvRunner::new(config.runner.clone());
    validate_runner_available(&runner)?;

    let source = resolve(script, console)?;
    let path = source.path();
    validate_script(path, console)?;

    let content = read_script(path)?;
    let dependencies = run_dependencies(&content, config, console)?;

    let code = runner.run(path, &dependencies, script_args, console)?;
    if code != 0 {
        console.error(&format!("Script execution failed with exit code {}", code));
    }
    Ok(code)
}

/// `check`: render the analysis without touching the script
pub fn check_command(
    script: &str,
    format: OutputFormat,
    config: &Pep723Config,
    console: &Console,
) -> Result<String> {
    let source = resolve(script, console)?;
    validate_script_exists(source.path())?;

    let report = analyzer(config)?.report(source.path(), console);
    Ok(format_report(&report, format)?)
}

/// `add` / `upgrade`: write the metadata block into the script
pub fn add_command(script: &str, config: &Pep723Config, console: &Console) -> Result<()> {
    let source = resolve(script, console)?;
    validate_script_exists(source.path())?;

    let remote_url = source.url().map(String::from);
    let path = source.into_persistent_path()?;

    let content = read_script(&path)?;
    let dependencies = analyzer(config)?.analyze_source(&content, console).dependencies;
    let metadata = generate_metadata(&dependencies, &config.python_version);
    let updated = reconcile(&content, &metadata);
    if updated != content {
        fs::write(&path, &updated)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        console.verbose("Metadata already up to date");
    }

    if let Some(url) = remote_url {
        console.info(&format!("Working with downloaded script at {}", path.display()));
        console.warning(&format!("Cannot update original remote script. ({})", url));
    }

    console.success(&format!("Updated {} with PEP 723 metadata.", path.display()));
    report_dependencies(
        console,
        "Dependencies",
        &dependencies,
        "No external dependencies found.",
    );

    Ok(())
}
