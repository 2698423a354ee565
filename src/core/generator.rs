use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::GeneratorConfig;
use super::error::{GenerateError, EXIT_SUCCESS};
use super::scanner::{FileScanner, ModuleRef, SOURCE_EXTENSION};
use crate::formatters::{dedup_names, StubRenderer};
use crate::parsers::{FunctionExtractor, ParserFactory};

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Stub files written, in the order they were first written
    pub written: Vec<PathBuf>,
    /// Modules that define no functions
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<GenerateError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Highest exit code among the failures, or success.
    pub fn exit_code(&self) -> i32 {
        self.failures
            .iter()
            .map(GenerateError::exit_code)
            .max()
            .unwrap_or(EXIT_SUCCESS)
    }
}

/// Scans a source tree and writes one stub module per module that defines
/// at least one function.
pub struct StubGenerator {
    config: GeneratorConfig,
    extractor: Box<dyn FunctionExtractor>,
    renderer: Box<dyn StubRenderer + Send + Sync>,
}

impl StubGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let extractor = ParserFactory::new().get_extractor(SOURCE_EXTENSION)?;
        let renderer = config.style.renderer();
        Ok(Self {
            config,
            extractor,
            renderer,
        })
    }

    /// Generate every stub.
    ///
    /// Creating the output directory, and checking that it does not enclose
    /// the source directory, are the only steps that always abort the run. Per-file failures are collected in the summary unless `fail_fast`
    /// is set, in which case the first one is returned.
    pub fn run(&mut self) -> Result<RunSummary, GenerateError> {
        let output_dir = self.config.output_dir.clone();
        fs::create_dir_all(&output_dir).map_err(|source| GenerateError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        self.ensure_source_outside(&output_dir)?;

        let scanner =
            FileScanner::new(self.config.exclusions.clone()).with_output_guard(&output_dir);

        tracing::info!(
            source = %self.config.source_dir.display(),
            output = %output_dir.display(),
            style = self.renderer.style().as_str(),
            language = self.extractor.language_name(),
            "generating test stubs"
        );

        let mut summary = RunSummary::default();
        let mut stub_sources: HashMap<PathBuf, PathBuf> = HashMap::new();

        for item in scanner.scan(&self.config.source_dir) {
            let outcome = item.and_then(|module| {
                let target = self.process_module(&module)?;
                Ok((module, target))
            });

            match outcome {
                Ok((module, Some(target))) => {
                    println!("Created {}", target.display());
                    match stub_sources.insert(target.clone(), module.path.clone()) {
                        Some(previous) => tracing::warn!(
                            stub = %target.display(),
                            overwritten = %previous.display(),
                            by = %module.path.display(),
                            "modules share a name; the later one wins"
                        ),
                        None => summary.written.push(target),
                    }
                }
                Ok((module, None)) => {
                    tracing::debug!(path = %module.path.display(), "no functions, skipping");
                    summary.skipped.push(module.path);
                }
                Err(err) => {
                    if self.config.fail_fast {
                        return Err(err);
                    }
                    tracing::warn!(kind = err.kind().as_str(), "{err}");
                    summary.failures.push(err);
                }
            }
        }

        tracing::info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            failed = summary.failures.len(),
            "run finished"
        );

        Ok(summary)
    }

    /// Stubs land in the output directory and are never scanned, so an output
    /// directory at or above the source root would hide every module.
    fn ensure_source_outside(&self, output_dir: &Path) -> Result<(), GenerateError> {
        let (Ok(source), Ok(output)) = (
            fs::canonicalize(&self.config.source_dir),
            fs::canonicalize(output_dir),
        ) else {
            return Ok(());
        };

        if source.starts_with(&output) {
            return Err(GenerateError::SourceInsideOutput {
                path: self.config.source_dir.clone(),
                output: output_dir.to_path_buf(),
            });
        }
        Ok(())
    }

    fn process_module(&mut self, module: &ModuleRef) -> Result<Option<PathBuf>, GenerateError> {
        let functions = self.extractor.extract_file(&module.path)?;
        if functions.is_empty() {
            return Ok(None);
        }

        let functions = dedup_names(functions);
        tracing::debug!(
            path = %module.path.display(),
            functions = functions.len(),
            "extracted functions"
        );

        let content = self.renderer.render(&module.module_name, &functions);
        let target = self.config.output_dir.join(module.stub_file_name());
        fs::write(&target, content).map_err(|err| GenerateError::io(&target, err))?;

        Ok(Some(target))
    }
}
