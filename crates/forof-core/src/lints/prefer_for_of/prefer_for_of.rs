use crate::diagnostic::*;
use crate::lints::prefer_for_of::scope::LoopCandidate;
use crate::utils_ast::{NodeExt, NodeKind};
use tree_sitter::Node;

pub const RULE_NAME: &str = "prefer_for_of";

pub struct PreferForOf {
    array: String,
}

impl Violation for PreferForOf {
    fn name(&self) -> String {
        RULE_NAME.to_string()
    }
    fn body(&self) -> String {
        "Expected a for-each loop instead of a counted for loop with this simple iteration."
            .to_string()
    }
    fn suggestion(&self) -> Option<String> {
        Some(format!(
            "Use `for (const item of {})` instead.",
            self.array
        ))
    }
}

/// What a canonical loop header tells us: the name of the index and the
/// array it walks through.
#[derive(Debug, Clone, Copy)]
pub struct LoopHeader<'a> {
    pub index: &'a str,
    pub array: Node<'a>,
}

/// Returns the index and the array of a `for` statement whose header is
/// exactly `let i = 0; i < array.length; i++`, and `None` for any other
/// header.
pub fn loop_header<'a>(node: &Node<'a>, source: &'a str) -> Option<LoopHeader<'a>> {
    if node.node_kind() != NodeKind::ForStatement {
        return None;
    }

    let initializer = node.child_by_field_name("initializer")?;
    let condition = header_clause(node.child_by_field_name("condition"))?;
    let increment = header_clause(node.child_by_field_name("increment"))?;

    // Must start with `let i = 0`
    let index = zero_initialized_index(&initializer, source)?;

    // Must end with `i++` or one of its equivalents
    if !is_increment(&increment, index, source) {
        return None;
    }

    // Condition must be `i < array.length`
    let array = length_bound(&condition, index, source)?;

    Some(LoopHeader { index, array })
}

// Depending on the grammar version, the condition is either the expression
// itself or an `expression_statement` wrapping it. An empty clause is `;`.
fn header_clause(clause: Option<Node>) -> Option<Node> {
    let clause = clause?;
    match clause.kind() {
        "empty_statement" | ";" => None,
        "expression_statement" => clause.named_children_vec().first().copied(),
        _ => Some(clause),
    }
}

// `let i = 0`, `var i = 0`, or `const i = 0`, with a single declarator.
fn zero_initialized_index<'a>(initializer: &Node<'a>, source: &'a str) -> Option<&'a str> {
    if !matches!(
        initializer.kind(),
        "lexical_declaration" | "variable_declaration"
    ) {
        return None;
    }

    let declarators: Vec<Node> = initializer
        .named_children_vec()
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .collect();

    let [declarator] = declarators.as_slice() else {
        return None;
    };

    let name = declarator.child_by_field_name("name")?;
    let value = declarator.child_by_field_name("value")?;

    if name.node_kind() != NodeKind::Identifier || !value.is_number_literal(source, "0") {
        return None;
    }

    Some(name.text(source))
}

fn is_increment(node: &Node, index: &str, source: &str) -> bool {
    match node.node_kind() {
        // `i++` or `++i`
        NodeKind::UpdateExpression => {
            let mut cursor = node.walk();
            let is_plus_plus = node.children(&mut cursor).any(|child| child.kind() == "++");
            let argument = node.named_children_vec().first().copied();
            is_plus_plus && argument.is_some_and(|arg| arg.is_identifier_named(source, index))
        }
        // `i += 1`
        NodeKind::AugmentedAssignmentExpression => {
            let (Some(left), Some(operator), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) else {
                return false;
            };
            left.is_identifier_named(source, index)
                && operator.kind() == "+="
                && right.is_number_literal(source, "1")
        }
        // `i = i + 1` or `i = 1 + i`
        NodeKind::AssignmentExpression => {
            let (Some(left), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) else {
                return false;
            };
            if !left.is_identifier_named(source, index)
                || right.node_kind() != NodeKind::BinaryExpression
            {
                return false;
            }

            let (Some(lhs), Some(operator), Some(rhs)) = (
                right.child_by_field_name("left"),
                right.child_by_field_name("operator"),
                right.child_by_field_name("right"),
            ) else {
                return false;
            };

            operator.kind() == "+"
                && ((lhs.is_identifier_named(source, index) && rhs.is_number_literal(source, "1"))
                    || (lhs.is_number_literal(source, "1") && rhs.is_identifier_named(source, index)))
        }
        _ => false,
    }
}

// `i < array.length` returns `array`, without its grouping parentheses.
fn length_bound<'a>(condition: &Node<'a>, index: &str, source: &str) -> Option<Node<'a>> {
    if condition.node_kind() != NodeKind::BinaryExpression {
        return None;
    }

    let left = condition.child_by_field_name("left")?;
    let operator = condition.child_by_field_name("operator")?;
    let right = condition.child_by_field_name("right")?;

    if operator.kind() != "<"
        || !left.is_identifier_named(source, index)
        || right.node_kind() != NodeKind::MemberExpression
    {
        return None;
    }

    let property = right.child_by_field_name("property")?;
    if property.node_kind() != NodeKind::PropertyIdentifier || property.text(source) != "length" {
        return None;
    }

    let object = right.child_by_field_name("object")?;
    Some(object.unwrap_parentheses())
}

/// Returns true if `reference`, an occurrence of the loop index, only reads
/// an element of `array`: it must be the index of `array[...]`, where
/// `array` is written the same way as in the loop header, and the element
/// must not be written to.
pub fn is_pure_array_read(reference: &Node, array: &Node, source: &str) -> bool {
    let Some(access) = reference.parent() else {
        return false;
    };

    if access.node_kind() != NodeKind::SubscriptExpression || !reference.is_field_of(&access, "index")
    {
        return false;
    }

    let Some(object) = access.child_by_field_name("object") else {
        return false;
    };

    if !object
        .unwrap_parentheses()
        .has_same_tokens(&array.unwrap_parentheses(), source)
    {
        return false;
    }

    !is_write_target(&access)
}

// Any position where the element is assigned, updated, deleted, or bound by
// a destructuring pattern.
fn is_write_target(node: &Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    match parent.kind() {
        // `a[i] = x`, `a[i] += x`, `a[i] ??= x`, etc.
        "assignment_expression" | "augmented_assignment_expression" => {
            node.is_field_of(&parent, "left")
        }
        // `a[i]++`, `--a[i]`
        "update_expression" => true,
        // `delete a[i]`
        "unary_expression" => {
            let mut cursor = parent.walk();
            parent
                .children(&mut cursor)
                .any(|child| child.kind() == "delete")
        }
        // `[a[i]] = x`, `[...a[i]] = x`
        "array_pattern" | "rest_pattern" => true,
        // `({ key: a[i] } = x)`
        "pair_pattern" => node.is_field_of(&parent, "value"),
        // `[a[i] = 0] = x`
        "assignment_pattern" | "object_assignment_pattern" => node.is_field_of(&parent, "left"),
        // `for (a[i] of x)`
        "for_in_statement" => node.is_field_of(&parent, "left"),
        // `(a[i]) = x`
        "parenthesized_expression" => is_write_target(&parent),
        _ => false,
    }
}

/// The reported range goes from `for` to the `)` closing the loop header.
pub fn header_range(node: &Node) -> TextRange {
    let mut cursor = node.walk();
    let close_paren = node
        .children(&mut cursor)
        .filter(|child| child.kind() == ")")
        .last();
    let end = close_paren.map_or(node.end_byte(), |paren| paren.end_byte());
    TextRange::new(node.start_byte(), end)
}

/// ## What it does
///
/// Checks for counted `for` loops whose index is only used to read elements
/// of the array it iterates over.
///
/// ## Why is this bad?
///
/// When the index serves no other purpose than `array[i]`, a `for...of` loop
/// says the same thing with less code and no way to get the bounds wrong.
///
/// Only the canonical header `let i = 0; i < array.length; i++` is detected
/// (`++i`, `i += 1`, `i = i + 1` and `i = 1 + i` are accepted too). The loop
/// is not reported as soon as the index is used for anything else than
/// reading `array[i]`, including writes such as `array[i] = x`.
///
/// ## Example
///
/// ```js
/// for (let i = 0; i < items.length; i++) {
///   console.log(items[i]);
/// }
/// ```
///
/// Use instead:
/// ```js
/// for (const item of items) {
///   console.log(item);
/// }
/// ```
pub fn prefer_for_of(node: &Node, candidate: &LoopCandidate, source: &str) -> Option<Diagnostic> {
    if !candidate.qualifies() {
        return None;
    }

    let mut diagnostic = Diagnostic::new(
        PreferForOf { array: candidate.array.text(source).to_string() },
        header_range(node),
    );
    diagnostic.location = Some(node.start_position().into());

    Some(diagnostic)
}
