pub mod common;
pub mod python;

use anyhow::Result;
use std::path::Path;

use crate::core::{GenerateError, ParseError};

/// Turns one module's source text into the names of the functions it defines.
pub trait FunctionExtractor {
    /// Names of every function definition in `source`, outermost first.
    ///
    /// Duplicates are kept; an empty result means the module defines nothing.
    fn extract(&mut self, source: &str) -> Result<Vec<String>, ParseError>;

    fn language_name(&self) -> &str;

    fn extract_file(&mut self, file_path: &Path) -> Result<Vec<String>, GenerateError> {
        let source = common::read_source(file_path)?;
        self.extract(&source)
            .map_err(|err| GenerateError::parse(file_path, err))
    }
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_extractor(&self, extension: &str) -> Result<Box<dyn FunctionExtractor>> {
        match extension {
            "py" => Ok(Box::new(python::PythonExtractor::new()?)),
            _ => anyhow::bail!("Unsupported source extension: {}", extension),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
