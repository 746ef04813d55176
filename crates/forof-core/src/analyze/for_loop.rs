use crate::check::Checker;
use anyhow::Context;
use tree_sitter::Node;

use crate::lints::prefer_for_of::prefer_for_of::{loop_header, prefer_for_of};

/// Opens a candidate loop if the header of this `for` statement is canonical.
///
/// Returns the array expression of the header, which must be visited with the
/// candidate open, followed by the body.
pub fn enter_for_loop<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> Option<Node<'a>> {
    let header = loop_header(node, checker.source())?;

    checker.loops.push(header.index, header.array);

    tracing::trace!(
        "Tracking index `{}` of loop at {}:{} (depth {})",
        header.index,
        node.start_position().row + 1,
        node.start_position().column + 1,
        checker.loops.depth()
    );

    Some(header.array)
}

/// Closes the innermost candidate loop once its body has been visited, and
/// reports it if its index was only used to read the array.
pub fn exit_for_loop<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> anyhow::Result<()> {
    let candidate = checker
        .loops
        .pop()
        .context("Closing a `for` loop that was never opened")?;

    if !checker.should_skip_node(node) {
        checker.report_diagnostic(prefer_for_of(node, &candidate, checker.source()));
    }
    Ok(())
}
