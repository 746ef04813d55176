//! Extension traits for tree-sitter nodes providing ergonomic helper methods.

use tree_sitter::{Node, TreeCursor};

/// The node kinds the linter cares about. Everything else is `Other` and is
/// only visited for its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    ForStatement,
    Identifier,
    /// `{ i }` in an object literal or a destructuring pattern.
    ShorthandPropertyIdentifier,
    /// Object keys and member names, e.g. `i` in `{ i: 1 }` or `obj.i`.
    PropertyIdentifier,
    SubscriptExpression,
    MemberExpression,
    BinaryExpression,
    UpdateExpression,
    AssignmentExpression,
    AugmentedAssignmentExpression,
    ParenthesizedExpression,
    Number,
    Comment,
    Other,
}

impl NodeKind {
    pub fn of(node: &Node) -> Self {
        match node.kind() {
            "for_statement" => Self::ForStatement,
            "identifier" => Self::Identifier,
            "shorthand_property_identifier" | "shorthand_property_identifier_pattern" => {
                Self::ShorthandPropertyIdentifier
            }
            "property_identifier" => Self::PropertyIdentifier,
            "subscript_expression" => Self::SubscriptExpression,
            "member_expression" => Self::MemberExpression,
            "binary_expression" => Self::BinaryExpression,
            "update_expression" => Self::UpdateExpression,
            "assignment_expression" => Self::AssignmentExpression,
            "augmented_assignment_expression" => Self::AugmentedAssignmentExpression,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "number" => Self::Number,
            "comment" | "html_comment" => Self::Comment,
            _ => Self::Other,
        }
    }
}

pub trait NodeExt<'tree> {
    fn node_kind(&self) -> NodeKind;

    /// Source text covered by this node.
    fn text<'s>(&self, source: &'s str) -> &'s str;

    /// Returns true if `parent` stores this node in its field `field`.
    fn is_field_of(&self, parent: &Node<'tree>, field: &str) -> bool;

    /// Named children, without comments.
    fn named_children_vec(&self) -> Vec<Node<'tree>>;

    /// `((x))` -> `x`
    fn unwrap_parentheses(&self) -> Node<'tree>;

    /// Returns true if this is the numeric literal written exactly `value`.
    fn is_number_literal(&self, source: &str, value: &str) -> bool;

    /// Returns true if this is the identifier `name`.
    fn is_identifier_named(&self, source: &str, name: &str) -> bool;

    /// Text of every token below this node, comments excluded.
    fn tokens<'s>(&self, source: &'s str) -> Vec<&'s str>;

    /// Textual equality that ignores whitespace and comments between tokens.
    fn has_same_tokens(&self, other: &Node<'tree>, source: &str) -> bool {
        self.tokens(source) == other.tokens(source)
    }
}

impl<'tree> NodeExt<'tree> for Node<'tree> {
    fn node_kind(&self) -> NodeKind {
        NodeKind::of(self)
    }

    fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.byte_range()]
    }

    fn is_field_of(&self, parent: &Node<'tree>, field: &str) -> bool {
        parent.child_by_field_name(field) == Some(*self)
    }

    fn named_children_vec(&self) -> Vec<Node<'tree>> {
        let mut cursor = self.walk();
        let children = self
            .named_children(&mut cursor)
            .filter(|child| child.node_kind() != NodeKind::Comment)
            .collect();
        children
    }

    fn unwrap_parentheses(&self) -> Node<'tree> {
        let mut node = *self;
        while node.node_kind() == NodeKind::ParenthesizedExpression {
            match node.named_children_vec().first() {
                Some(inner) => node = *inner,
                None => break,
            }
        }
        node
    }

    fn is_number_literal(&self, source: &str, value: &str) -> bool {
        self.node_kind() == NodeKind::Number && self.text(source) == value
    }

    fn is_identifier_named(&self, source: &str, name: &str) -> bool {
        self.node_kind() == NodeKind::Identifier && self.text(source) == name
    }

    fn tokens<'s>(&self, source: &'s str) -> Vec<&'s str> {
        let mut tokens = Vec::new();
        let mut cursor = self.walk();
        collect_tokens(&mut cursor, source, &mut tokens);
        tokens
    }
}

fn collect_tokens<'s>(cursor: &mut TreeCursor, source: &'s str, tokens: &mut Vec<&'s str>) {
    let node = cursor.node();
    if node.node_kind() == NodeKind::Comment {
        return;
    }

    if cursor.goto_first_child() {
        loop {
            collect_tokens(cursor, source, tokens);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    } else if !node.byte_range().is_empty() {
        tokens.push(&source[node.byte_range()]);
    }
}
