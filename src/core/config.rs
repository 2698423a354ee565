use std::path::{Path, PathBuf};

use super::scanner::ExclusionSet;
use crate::formatters::StubStyle;

/// Literal appended to the source directory when no output directory is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "Test";

/// Everything a [`StubGenerator`](super::StubGenerator) run needs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub style: StubStyle,
    pub exclusions: ExclusionSet,
    /// Abort on the first failing file instead of carrying on
    pub fail_fast: bool,
}

impl GeneratorConfig {
    /// Config with the derived default output directory and default policies.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let output_dir = default_output_dir(&source_dir);
        Self {
            source_dir,
            output_dir,
            style: StubStyle::default(),
            exclusions: ExclusionSet::default(),
            fail_fast: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_style(mut self, style: StubStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// `src` becomes `srcTest`, `src/` becomes `srcTest`, `.` becomes `.Test`.
pub fn default_output_dir(source_dir: &Path) -> PathBuf {
    let raw = source_dir.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    PathBuf::from(format!("{trimmed}{DEFAULT_OUTPUT_SUFFIX}"))
}
