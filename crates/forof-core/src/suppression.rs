//! Comment directives that silence the linter.
//!
//! - `// forof-ignore` suppresses the diagnostics of a node starting on the
//!   same line. When the comment stands alone on its line, it also covers the
//!   line just below;
//! - `// forof-ignore-file` suppresses all diagnostics of the file.
//!
//! Block comments work too. Anything after the directive, separated by
//! whitespace, is treated as an explanation and ignored.

use rustc_hash::FxHashSet;
use tree_sitter::{Node, TreeCursor};

use crate::utils_ast::{NodeExt, NodeKind};

const IGNORE: &str = "forof-ignore";
const IGNORE_FILE: &str = "forof-ignore-file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Ignore,
    IgnoreFile,
}

#[derive(Debug, Default)]
pub struct SuppressionManager {
    skip_file: bool,
    /// 0-based rows on which a `forof-ignore` comment ends.
    ignore_rows: FxHashSet<usize>,
    /// 0-based rows just below a `forof-ignore` comment that has no code
    /// before it on its line.
    ignore_next_rows: FxHashSet<usize>,
}

impl SuppressionManager {
    /// Collect the directives of all comments below `root`.
    pub fn from_node(root: &Node, source: &str) -> Self {
        let mut manager = Self::default();
        let mut cursor = root.walk();
        manager.collect(&mut cursor, source);
        manager
    }

    fn collect(&mut self, cursor: &mut TreeCursor, source: &str) {
        let node = cursor.node();

        if node.node_kind() == NodeKind::Comment {
            match parse_directive(node.text(source)) {
                Some(Directive::IgnoreFile) => self.skip_file = true,
                Some(Directive::Ignore) => {
                    let row = node.end_position().row;
                    self.ignore_rows.insert(row);
                    if is_own_line(&node, source) {
                        self.ignore_next_rows.insert(row + 1);
                    }
                }
                None => {}
            }
            return;
        }

        if cursor.goto_first_child() {
            loop {
                self.collect(cursor, source);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    pub fn should_skip_file(&self) -> bool {
        self.skip_file
    }

    /// Check if diagnostics for the given node should be skipped
    pub fn should_skip_node(&self, node: &Node) -> bool {
        let row = node.start_position().row;
        self.ignore_rows.contains(&row) || self.ignore_next_rows.contains(&row)
    }
}

// Only whitespace between the start of the line and the comment.
fn is_own_line(comment: &Node, source: &str) -> bool {
    let start = comment.start_byte();
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..start].trim().is_empty()
}

fn parse_directive(comment: &str) -> Option<Directive> {
    let content = if let Some(line) = comment.strip_prefix("//") {
        line
    } else {
        comment.strip_prefix("/*")?.strip_suffix("*/")?
    };

    match content.split_whitespace().next()? {
        IGNORE => Some(Directive::Ignore),
        IGNORE_FILE => Some(Directive::IgnoreFile),
        _ => None,
    }
}
