//! # teststub
//!
//! Bootstrap test scaffolding for an existing Python codebase.
//!
//! teststub walks a source tree, parses every `.py` module with tree-sitter,
//! collects the names of the functions it defines and writes one placeholder
//! test module per source module, `test_<module>.py`, into an output directory.
//!
//! ## Pipeline
//!
//! - **Scanner** ([`core::FileScanner`]): recursive walk, pruning excluded
//!   directories and the output directory itself
//! - **Extractor** ([`parsers::FunctionExtractor`]): function names at every
//!   nesting depth, outermost first
//! - **Renderer** ([`formatters::StubRenderer`]): `unittest` classes or bare
//!   assert-style functions
//! - **Generator** ([`core::StubGenerator`]): ties the above together and
//!   writes the files
//!
//! Modules without functions produce no file. Existing stubs are overwritten.

pub mod core;
pub mod formatters;
pub mod parsers;
