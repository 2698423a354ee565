use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Process exit status for a run that generated every stub it could.
pub const EXIT_SUCCESS: i32 = 0;
/// Unexpected failure outside the documented taxonomy.
pub const EXIT_INTERNAL: i32 = 1;
/// Invalid command line (reported by clap).
pub const EXIT_USAGE: i32 = 2;

/// A syntax error located inside one source text.
///
/// Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Errors raised while generating stubs for a source tree.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The source file could not be parsed.
    #[error("{}:{line}:{column}: syntax error: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The source file (or its name) is not valid UTF-8.
    #[error("{}: source is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    /// Reading a source file, listing a directory or writing a stub failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory is the source directory or one of its ancestors.
    #[error(
        "output directory {} contains the source directory {}; pick an output directory outside it",
        .output.display(),
        .path.display()
    )]
    SourceInsideOutput { path: PathBuf, output: PathBuf },

    /// The output directory could not be created.
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of [`GenerateError`], each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Syntax,
    Encoding,
    Io,
    OutputDir,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Syntax => 3,
            ErrorKind::Encoding => 4,
            ErrorKind::Io => 5,
            ErrorKind::OutputDir => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Io => "io",
            ErrorKind::OutputDir => "output-dir",
        }
    }
}

impl GenerateError {
    pub fn parse(path: impl Into<PathBuf>, err: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            line: err.line,
            column: err.column,
            message: err.message,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert a directory-walk failure, falling back to `root` when the
    /// walker cannot name the offending path.
    pub fn from_walk(err: walkdir::Error, root: &Path) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        Self::Io {
            path,
            source: io::Error::from(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Parse { .. } => ErrorKind::Syntax,
            GenerateError::Encoding { .. } => ErrorKind::Encoding,
            GenerateError::Io { .. } => ErrorKind::Io,
            GenerateError::OutputDir { .. } | GenerateError::SourceInsideOutput { .. } => {
                ErrorKind::OutputDir
            }
        }
    }

    /// Path of the file or directory the error is about.
    pub fn path(&self) -> &Path {
        match self {
            GenerateError::Parse { path, .. }
            | GenerateError::Encoding { path }
            | GenerateError::Io { path, .. }
            | GenerateError::OutputDir { path, .. }
            | GenerateError::SourceInsideOutput { path, .. } => path,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_keeps_location_and_path() {
        let err = GenerateError::parse(
            "pkg/broken.py",
            ParseError {
                line: 3,
                column: 9,
                message: "invalid syntax".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.path(), Path::new("pkg/broken.py"));
        assert_eq!(
            err.to_string(),
            "pkg/broken.py:3:9: syntax error: invalid syntax"
        );
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let mut codes: Vec<i32> = [
            ErrorKind::Syntax,
            ErrorKind::Encoding,
            ErrorKind::Io,
            ErrorKind::OutputDir,
        ]
        .iter()
        .map(|kind| kind.exit_code())
        .collect();
        codes.extend([EXIT_SUCCESS, EXIT_INTERNAL, EXIT_USAGE]);
        let len = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), len);
    }
}
