use anyhow::Result;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::core::{GenerateError, ParseError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SNIPPET_LEN: usize = 24;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting trees that contain error recovery nodes.
    pub fn parse_strict(&mut self, source: &str) -> Result<Tree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or_else(|| ParseError {
            line: 1,
            column: 1,
            message: "parser produced no syntax tree".to_string(),
        })?;

        if let Some(node) = first_syntax_error(tree.root_node()) {
            return Err(syntax_error(&node, source.as_bytes()));
        }
        Ok(tree)
    }
}

/// Read a source file as strict UTF-8, dropping a leading byte-order mark.
pub fn read_source(file_path: &Path) -> Result<String, GenerateError> {
    let mut bytes = fs::read(file_path).map_err(|err| GenerateError::io(file_path, err))?;
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|_| GenerateError::Encoding {
        path: file_path.to_path_buf(),
    })
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// First ERROR or MISSING node in document order.
pub fn first_syntax_error<'t>(node: TSNode<'t>) -> Option<TSNode<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_syntax_error);
    found
}

fn syntax_error(node: &TSNode, source: &[u8]) -> ParseError {
    if node.is_missing() {
        return error_at(node, format!("missing `{}`", node.kind()));
    }

    let text = extract_text(node, source);
    let snippet: String = text
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .chars()
        .take(SNIPPET_LEN)
        .collect();
    if snippet.is_empty() {
        error_at(node, "invalid syntax")
    } else {
        error_at(node, format!("invalid syntax near `{snippet}`"))
    }
}

/// A [`ParseError`] located at the start of `node`.
pub fn error_at(node: &TSNode, message: impl Into<String>) -> ParseError {
    let position = node.start_position();
    ParseError {
        line: position.row + 1,
        column: position.column + 1,
        message: message.into(),
    }
}

/// First node in document order, `node` included, for which `pred` holds.
pub fn find_first<'t>(node: TSNode<'t>, pred: &impl Fn(&TSNode<'t>) -> bool) -> Option<TSNode<'t>> {
    if pred(&node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find_map(|child| find_first(child, pred));
    found
}

/// Visit `root` and its descendants level by level.
///
/// Nodes whose kind is listed in `transparent` are never visited; their
/// children are queued in their place, one level up. This keeps purely
/// structural wrappers (bodies, decorator wrappers) from pushing the
/// definitions they hold a level deeper.
pub fn walk_breadth_first<'t>(
    root: TSNode<'t>,
    transparent: &[&str],
    mut visit: impl FnMut(TSNode<'t>),
) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        visit(node);
        queue_children(node, transparent, &mut queue);
    }
}

fn queue_children<'t>(node: TSNode<'t>, transparent: &[&str], queue: &mut VecDeque<TSNode<'t>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if transparent.contains(&child.kind()) {
            queue_children(child, transparent, queue);
        } else {
            queue.push_back(child);
        }
    }
}
