use anyhow::Result;
use tree_sitter::Node as TSNode;

use super::common::{error_at, extract_text, find_first, walk_breadth_first, TreeSitterParser};
use super::FunctionExtractor;
use crate::core::ParseError;

/// Wrappers that carry no definition of their own. Their contents are
/// treated as direct children of the enclosing statement.
const TRANSPARENT_KINDS: &[&str] = &[
    "block",
    "decorated_definition",
    "else_clause",
    "finally_clause",
];

/// Statements the grammar still accepts but Python 3 rejects.
const LEGACY_STATEMENTS: &[(&str, &str)] = &[
    ("print_statement", "`print` statement"),
    ("exec_statement", "`exec` statement"),
];

/// Collects Python function names at every nesting depth.
///
/// Methods, functions nested in other functions, decorated functions and
/// `async def` all count. Lambdas do not. Names come out level by level:
/// every module-level function first, then everything defined one level
/// inside a function or class, and so on.
pub struct PythonExtractor {
    parser: TreeSitterParser,
}

impl PythonExtractor {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_python::language();
        let parser = TreeSitterParser::new(language)?;
        Ok(Self { parser })
    }

    fn reject_legacy_statements(&self, root: TSNode) -> Result<(), ParseError> {
        let is_legacy = |node: &TSNode| LEGACY_STATEMENTS.iter().any(|(kind, _)| node.kind() == *kind);
        match find_first(root, &is_legacy) {
            Some(node) => {
                let label = LEGACY_STATEMENTS
                    .iter()
                    .find(|(kind, _)| node.kind() == *kind)
                    .map(|(_, label)| *label)
                    .unwrap_or("statement");
                Err(error_at(&node, format!("Python 2 {label} is not valid Python 3")))
            }
            None => Ok(()),
        }
    }

    fn collect_function_names(&self, root: TSNode, source: &[u8]) -> Vec<String> {
        let mut names = Vec::new();
        walk_breadth_first(root, TRANSPARENT_KINDS, |node| {
            if node.kind() != "function_definition" {
                return;
            }
            if let Some(name_node) = node.child_by_field_name("name") {
                names.push(extract_text(&name_node, source).to_string());
            }
        });
        names
    }
}

impl FunctionExtractor for PythonExtractor {
    fn extract(&mut self, source: &str) -> Result<Vec<String>, ParseError> {
        let tree = self.parser.parse_strict(source)?;
        let root = tree.root_node();
        self.reject_legacy_statements(root)?;
        Ok(self.collect_function_names(root, source.as_bytes()))
    }

    fn language_name(&self) -> &str {
        "python"
    }
}
