use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tree_sitter::Node;

use crate::analyze;
use crate::config::Config;
use crate::diagnostic::*;
use crate::error::{ParseError, UnsupportedLanguageError};
use crate::fs::relativize_path;
use crate::language::SourceLanguage;
use crate::lints::prefer_for_of::scope::LoopScopes;
use crate::suppression::SuppressionManager;
use crate::utils_ast::{NodeExt, NodeKind};

pub fn check(config: Config) -> Vec<(String, Result<Vec<Diagnostic>, anyhow::Error>)> {
    config
        .paths
        .par_iter()
        .map(|file| {
            let res = check_path(file);
            (relativize_path(file), res)
        })
        .collect()
}

pub fn check_path(path: &PathBuf) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let path = relativize_path(path);
    let contents = fs::read_to_string(Path::new(&path))
        .with_context(|| format!("Failed to read file: {path}"))?;

    let checks = get_checks(&contents, &PathBuf::from(&path))
        .with_context(|| format!("Failed to get checks for file: {path}"))?;

    Ok(checks)
}

#[derive(Debug)]
// The object that will collect diagnostics in check_node(). One per analyzed
// file, so nothing is shared between files.
pub struct Checker<'a> {
    // The code being analyzed.
    source: &'a str,
    // The diagnostics to report (possibly empty).
    pub diagnostics: Vec<Diagnostic>,
    // Tracks comment-based suppression directives like `// forof-ignore`
    pub suppression: SuppressionManager,
    // The counted loops enclosing the node being visited.
    pub loops: LoopScopes<'a>,
}

impl<'a> Checker<'a> {
    fn new(source: &'a str, suppression: SuppressionManager) -> Self {
        Self {
            source,
            diagnostics: vec![],
            suppression,
            loops: LoopScopes::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    // This takes an Option<Diagnostic> because each lint rule reports a
    // Some(Diagnostic) or None.
    pub(crate) fn report_diagnostic(&mut self, diagnostic: Option<Diagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Check if a node should be skipped due to suppression comments
    pub(crate) fn should_skip_node(&self, node: &Node) -> bool {
        self.suppression.should_skip_node(node)
    }
}

// Takes the JS/TS code as a string, parses it with the grammar matching the
// file extension, and obtains a (possibly empty) vector of `Diagnostic`s.
pub fn get_checks(contents: &str, file: &Path) -> Result<Vec<Diagnostic>> {
    let language = SourceLanguage::from_path(file)
        .ok_or_else(|| UnsupportedLanguageError { filename: file.to_path_buf() })?;

    let tree = language.parse(contents)?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(ParseError { filename: file.to_path_buf() }.into());
    }

    let diagnostics = check_tree(&root, contents)?
        .into_iter()
        .map(|mut x| {
            x.filename = file.to_path_buf();
            x
        })
        .collect();

    Ok(diagnostics)
}

/// Run all rules on an already parsed tree. `source` must be the text the
/// tree was parsed from.
pub fn check_tree<'a>(root: &Node<'a>, source: &'a str) -> Result<Vec<Diagnostic>> {
    let suppression = SuppressionManager::from_node(root, source);

    // Check if the entire file should be skipped
    if suppression.should_skip_file() {
        tracing::debug!("Skipping file because of a `forof-ignore-file` comment");
        return Ok(vec![]);
    }

    let mut checker = Checker::new(source, suppression);
    check_node(root, &mut checker)?;

    debug_assert!(checker.loops.is_empty());

    Ok(checker.diagnostics)
}

// This function does two things:
// - dispatch a node to its appropriate set of rules, e.g. identifiers are
//   sent to analyze::identifier::identifier.
// - apply the function recursively to the node's children (if any).
//
// Counted `for` loops are special: when their header is canonical, the loop
// is registered before visiting its body and its verdict is only known once
// the whole body has been visited.
pub fn check_node<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> anyhow::Result<()> {
    match node.node_kind() {
        NodeKind::ForStatement => {
            let body = node
                .child_by_field_name("body")
                .context("Found a `for` statement without a body")?;

            match analyze::for_loop::enter_for_loop(node, checker) {
                Some(array) => {
                    check_node(&array, checker)?;
                    check_node(&body, checker)?;
                    analyze::for_loop::exit_for_loop(node, checker)?;
                }
                None => check_children(node, checker)?,
            }
        }
        NodeKind::Identifier | NodeKind::ShorthandPropertyIdentifier => {
            analyze::identifier::identifier(node, checker)?;
        }
        NodeKind::PropertyIdentifier => {
            analyze::identifier::property_identifier(node, checker)?;
        }
        NodeKind::Comment => {}
        _ => check_children(node, checker)?,
    }
    Ok(())
}

fn check_children<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> anyhow::Result<()> {
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
    for child in children {
        check_node(&child, checker)?;
    }
    Ok(())
}
