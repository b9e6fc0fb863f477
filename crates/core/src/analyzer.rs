use crate::config::Pep723Config;
use crate::console::DiagnosticSink;
use crate::metadata::generate_metadata;
use crate::models::{Analysis, DependencyList, ImportType, ReportMetadata, ScriptReport};
use crate::parsers::{ParserError, PythonParser};
use crate::resolver::package_name;
use crate::universe::{ModuleUniverse, UniverseError};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Module universe error: {0}")]
    Universe(#[from] UniverseError),
    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),
}

/// Determines which imports of a script need third-party packages
pub struct ScriptAnalyzer {
    config: Pep723Config,
    universe: ModuleUniverse,
    parser: PythonParser,
}

impl ScriptAnalyzer {
    /// Build the module universe described by `config` and a parser
    pub fn new(config: Pep723Config) -> Result<Self, AnalyzeError> {
        let universe = ModuleUniverse::for_interpreter(config.interpreter.as_deref())?;
        Self::with_universe(config, universe)
    }

    pub fn with_universe(
        config: Pep723Config,
        universe: ModuleUniverse,
    ) -> Result<Self, AnalyzeError> {
        Ok(Self {
            config,
            universe,
            parser: PythonParser::new()?,
        })
    }

    pub fn config(&self) -> &Pep723Config {
        &self.config
    }

    pub fn universe(&self) -> &ModuleUniverse {
        &self.universe
    }

    /// Analyze script text. Unparseable text is reported to `sink` and
    /// yields an analysis with no imports.
    pub fn analyze_source(&mut self, source: &str, sink: &dyn DiagnosticSink) -> Analysis {
        self.analyze_text(source, "script", sink)
    }

    /// Analyze a script on disk. A read failure is treated like a parse
    /// failure.
    pub fn analyze_file(&mut self, path: &Path, sink: &dyn DiagnosticSink) -> Analysis {
        match fs::read_to_string(path) {
            Ok(content) => self.analyze_text(&content, &path.display().to_string(), sink),
            Err(e) => {
                sink.error(&format!("Error reading {}: {}", path.display(), e));
                Analysis {
                    failed: true,
                    ..Analysis::default()
                }
            }
        }
    }

    pub fn third_party_imports(
        &mut self,
        path: &Path,
        sink: &dyn DiagnosticSink,
    ) -> DependencyList {
        self.analyze_file(path, sink).dependencies
    }

    /// Metadata block for the script at `path`
    pub fn generate(&mut self, path: &Path, sink: &dyn DiagnosticSink) -> String {
        let dependencies = self.third_party_imports(path, sink);
        generate_metadata(&dependencies, &self.config.python_version)
    }

    pub fn report(&mut self, path: &Path, sink: &dyn DiagnosticSink) -> ScriptReport {
        let analysis = self.analyze_file(path, sink);
        let metadata_block = generate_metadata(&analysis.dependencies, &self.config.python_version);

        ScriptReport {
            script: path.to_path_buf(),
            python_version: self.config.python_version.clone(),
            analysis,
            metadata_block,
            metadata: ReportMetadata::default(),
        }
    }

    fn analyze_text(&mut self, source: &str, origin: &str, sink: &dyn DiagnosticSink) -> Analysis {
        let mut imports = match self.parser.parse(source) {
            Ok(imports) => imports,
            Err(e) => {
                sink.error(&format!("Error parsing {}: {}", origin, e));
                return Analysis {
                    failed: true,
                    ..Analysis::default()
                };
            }
        };

        let mut stdlib_modules = BTreeSet::new();
        let mut packages = Vec::new();

        for import in &mut imports {
            import.import_type = self.universe.categorize(import);

            match (import.import_type, import.top_level_name()) {
                (ImportType::Stdlib, Some(name)) => {
                    sink.verbose(&format!("line {}: {} is part of the standard library", import.line, name));
                    stdlib_modules.insert(name.to_string());
                }
                (ImportType::External, Some(name)) => {
                    let package = package_name(name);
                    if package == name {
                        sink.verbose(&format!("line {}: {} is third-party", import.line, name));
                    } else {
                        sink.verbose(&format!(
                            "line {}: {} is provided by package {}",
                            import.line, name, package
                        ));
                    }
                    packages.push(package.to_string());
                }
                _ => {
                    sink.verbose(&format!(
                        "line {}: skipping bare relative import {}",
                        import.line, import.module
                    ));
                }
            }
        }

        Analysis {
            imports,
            stdlib_modules: stdlib_modules.into_iter().collect(),
            dependencies: packages.into_iter().collect(),
            failed: false,
        }
    }
}
