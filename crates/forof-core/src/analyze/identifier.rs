use crate::check::Checker;
use crate::utils_ast::NodeExt;
use tree_sitter::Node;

use crate::lints::prefer_for_of::prefer_for_of::is_pure_array_read;

pub fn identifier<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> anyhow::Result<()> {
    let source = checker.source();
    let name = node.text(source);

    // Not the index of a loop we're tracking
    let Some(candidate) = checker.loops.resolve_mut(name) else {
        return Ok(());
    };

    if candidate.qualifies() && !is_pure_array_read(node, &candidate.array, source) {
        candidate.disqualify();
    }
    Ok(())
}

// Only object keys, e.g. `{ i: 1 }`, count as a use of the name. Member names
// in `obj.i` and method names don't.
pub fn property_identifier<'a>(node: &Node<'a>, checker: &mut Checker<'a>) -> anyhow::Result<()> {
    let Some(parent) = node.parent() else {
        return Ok(());
    };

    if parent.kind() == "pair" && node.is_field_of(&parent, "key") {
        identifier(node, checker)?;
    }
    Ok(())
}
