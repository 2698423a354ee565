use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error::GenerateError;

/// Extension of the source modules the scanner picks up.
pub const SOURCE_EXTENSION: &str = "py";

/// Directory-name fragments that are never descended into by default:
/// virtual environments and bytecode caches.
pub const DEFAULT_EXCLUDED_FRAGMENTS: &[&str] = &["venv", "__pycache__"];

/// One discovered source module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    pub path: PathBuf,
    /// File stem, e.g. `mathutils` for `pkg/mathutils.py`
    pub module_name: String,
}

impl ModuleRef {
    /// Name of the stub file generated for this module.
    pub fn stub_file_name(&self) -> String {
        format!("test_{}.{}", self.module_name, SOURCE_EXTENSION)
    }
}

/// Directory-name fragments that prune the traversal.
///
/// A directory is skipped when any fragment occurs anywhere in its name, so
/// `venv` also covers `.venv` and `venv311`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    fragments: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FRAGMENTS.iter().copied())
    }
}

impl ExclusionSet {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::empty();
        for fragment in fragments {
            set = set.with_fragment(fragment);
        }
        set
    }

    pub fn empty() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Add a fragment; empty and repeated fragments are ignored.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        if !fragment.is_empty() && !self.fragments.contains(&fragment) {
            self.fragments.push(fragment);
        }
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn matches(&self, dir_name: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| dir_name.contains(fragment.as_str()))
    }
}

/// Walks a source tree and yields every eligible module.
pub struct FileScanner {
    exclusions: ExclusionSet,
    output_guard: Option<PathBuf>,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new(ExclusionSet::default())
    }
}

impl FileScanner {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            output_guard: None,
        }
    }

    /// Never yield anything located at or below `output_dir`.
    ///
    /// The directory is compared in canonical form, so it should exist by the
    /// time it is installed. A root at or below the guarded directory is
    /// itself pruned and the scan yields nothing.
    pub fn with_output_guard(mut self, output_dir: &Path) -> Self {
        let guard = fs::canonicalize(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
        self.output_guard = Some(guard);
        self
    }

    /// Lazily walk `root`, yielding one item per eligible module.
    ///
    /// Directories that cannot be listed come out as `Io` errors and the walk
    /// carries on with their siblings. Entries are visited in file-name order
    /// within each directory.
    pub fn scan<'a>(
        &'a self,
        root: &Path,
    ) -> impl Iterator<Item = Result<ModuleRef, GenerateError>> + 'a {
        let root = root.to_path_buf();

        WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.should_descend(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.module_ref(&entry),
                Err(err) => Some(Err(GenerateError::from_walk(err, &root))),
            })
    }

    /// Collect a whole scan, stopping at the first error.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ModuleRef>, GenerateError> {
        self.scan(root).collect()
    }

    fn should_descend(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }

        if entry.depth() > 0 {
            if let Some(name) = entry.file_name().to_str() {
                if self.exclusions.matches(name) {
                    tracing::debug!(path = %entry.path().display(), "skipping excluded directory");
                    return false;
                }
            }
        }

        if let Some(guard) = &self.output_guard {
            if let Ok(canonical) = fs::canonicalize(entry.path()) {
                if canonical.starts_with(guard) {
                    tracing::debug!(path = %entry.path().display(), "skipping output directory");
                    return false;
                }
            }
        }

        true
    }

    fn module_ref(&self, entry: &DirEntry) -> Option<Result<ModuleRef, GenerateError>> {
        let path = entry.path();
        if !path.is_file() {
            return None;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
            return None;
        }

        let module_ref = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => Ok(ModuleRef {
                path: path.to_path_buf(),
                module_name: stem.to_string(),
            }),
            None => Err(GenerateError::Encoding {
                path: path.to_path_buf(),
            }),
        };
        Some(module_ref)
    }
}
