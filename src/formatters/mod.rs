//! Stub renderers.
//!
//! A renderer turns a module name plus the functions found in it into the
//! full text of a test module. Two layouts exist and one is picked per run:
//!
//! - [`ClassBasedStub`]: a `unittest.TestCase` subclass per function
//! - [`AssertionBasedStub`]: a bare pytest-style function per function,
//!   asserting the function returns something other than `None`

pub mod assertion_based;
pub mod class_based;

pub use assertion_based::AssertionBasedStub;
pub use class_based::ClassBasedStub;

use std::collections::HashSet;

/// Which stub layout a run produces.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StubStyle {
    #[default]
    Class,
    Assert,
}

impl StubStyle {
    pub fn renderer(self) -> Box<dyn StubRenderer + Send + Sync> {
        match self {
            StubStyle::Class => Box::new(ClassBasedStub),
            StubStyle::Assert => Box::new(AssertionBasedStub),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StubStyle::Class => "class",
            StubStyle::Assert => "assert",
        }
    }
}

pub trait StubRenderer {
    /// Full text of the stub module for `module_name`.
    fn render(&self, module_name: &str, functions: &[String]) -> String;

    fn style(&self) -> StubStyle;
}

/// Drop repeated names, keeping the first occurrence of each.
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let names = owned(&["setup", "run", "setup", "teardown", "run"]);
        assert_eq!(dedup_names(names), owned(&["setup", "run", "teardown"]));
    }

    #[test]
    fn capitalize_first_only_touches_first_char() {
        assert_eq!(capitalize_first("parseJSON"), "ParseJSON");
        assert_eq!(capitalize_first("_private"), "_private");
        assert_eq!(capitalize_first("ärger"), "Ärger");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn style_selects_matching_renderer() {
        for style in [StubStyle::Class, StubStyle::Assert] {
            assert_eq!(style.renderer().style(), style);
        }
    }
}
