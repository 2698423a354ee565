pub mod config;
pub mod error;
pub mod generator;
pub mod scanner;

pub use config::{default_output_dir, GeneratorConfig};
pub use error::{ErrorKind, GenerateError, ParseError};
pub use generator::{RunSummary, StubGenerator};
pub use scanner::{ExclusionSet, FileScanner, ModuleRef};
